use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub const MODEL_URL: &str = "origami_boat.glb";

/// Fetch a same-origin asset into bytes. No retry; a failed load leaves the
/// scene running without the model.
pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let response_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!(format!("fetch failed: {:?}", e)))?;
    let response: web::Response = response_value
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    if !response.ok() {
        return Err(anyhow::anyhow!("fetch {url}: HTTP {}", response.status()));
    }
    let buffer = JsFuture::from(
        response
            .array_buffer()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
