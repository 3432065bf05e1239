//! Texture asset loading.
//!
//! Loads run fire-and-forget on the tokio runtime, off the render cadence.
//! A completed decode crosses back to the event-loop thread as a user event;
//! nothing here ever touches a material directly, which keeps the material
//! list single-writer. A missing or undecodable file is logged and dropped,
//! and the affected material simply keeps its default appearance.

use std::path::PathBuf;

use anyhow::Context;
use winit::event_loop::EventLoopProxy;

use crate::{config, flow::AppEvent, scene::TextureSlot};

/// Resolve a logical asset name against the `assets/` directory.
pub fn asset_path(file_name: &str) -> PathBuf {
    std::path::Path::new("./").join("assets").join(file_name)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = asset_path(file_name);
    let data = tokio::fs::read(&path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(data)
}

/// Read and decode an image asset.
pub async fn load_image(file_name: &str) -> anyhow::Result<image::DynamicImage> {
    let data = load_binary(file_name).await?;
    let image = image::load_from_memory(&data)
        .with_context(|| format!("decoding {file_name}"))?;
    Ok(image)
}

/// Kick off the three texture loads.
///
/// The caller has already built the material list, so every completion that
/// arrives finds its target material alive.
pub fn spawn_texture_loads(runtime: &tokio::runtime::Runtime, proxy: EventLoopProxy<AppEvent>) {
    for (slot, file_name) in [
        (TextureSlot::RockSide, config::ROCK_TEXTURE),
        (TextureSlot::EarthTop, config::EARTH_TEXTURE),
        (TextureSlot::CookieBottom, config::COOKIE_TEXTURE),
    ] {
        let proxy = proxy.clone();
        runtime.spawn(async move {
            match load_image(file_name).await {
                Ok(image) => {
                    log::debug!("texture {file_name} decoded");
                    if proxy
                        .send_event(AppEvent::TextureLoaded { slot, image })
                        .is_err()
                    {
                        log::warn!("event loop closed before {file_name} could be delivered");
                    }
                }
                // No retry and no fallback asset: the material keeps its
                // default appearance.
                Err(e) => log::warn!("texture {file_name} could not be loaded: {e:#}"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_paths_resolve_under_the_assets_directory() {
        let path = asset_path(config::COOKIE_TEXTURE);
        assert!(path.ends_with("textures/cookie_texture.jpg"));
        assert!(path.to_string_lossy().contains("assets"));
    }
}
