use eyre::Result;
use log::debug;
use url::Url;

/// Still-frame preview for a video, served by YouTube's image CDN.
pub fn url(video_id: &str) -> Url {
    let raw = format!("https://img.youtube.com/vi/{video_id}/sddefault.jpg");
    Url::parse(&raw).unwrap() // safe: id is 11 URL-safe chars
}

/// Download the preview image bytes.
pub async fn fetch(client: &reqwest::Client, video_id: &str) -> Result<Vec<u8>> {
    let url = url(video_id);
    debug!("Fetching thumbnail from: {url}");

    let bytes = client
        .get(url.as_str())
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    debug!("Fetched {} thumbnail bytes for {video_id}", bytes.len());
    Ok(bytes.to_vec())
}
