//! Sprite assets
//!
//! Every sprite key resolves to either a loaded texture or a deterministic
//! placeholder. Loading never fails: a missing or broken PNG is logged and
//! that key falls back to its placeholder. Which strategy runs is chosen
//! once at startup from `AssetSettings`.

use std::collections::HashMap;
use macroquad::prelude::*;
use thiserror::Error;
use crate::config::{AssetSettings, AssetStrategy};

/// Largest accepted sprite edge in pixels
const MAX_SPRITE_SIZE: u32 = 2048;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {0}")]
    Read(String),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image too large ({width}x{height})")]
    TooLarge { width: u32, height: u32 },
}

/// Everything the renderer can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    PlayerIdle,
    PlayerRun,
    PlayerJump,
    EnemyRed,
    EnemyPurple,
    EnemyPink,
    Coin,
    Goal,
    ParticleCoin,
    ParticleHit,
}

impl SpriteKey {
    pub const ALL: [SpriteKey; 10] = [
        SpriteKey::PlayerIdle,
        SpriteKey::PlayerRun,
        SpriteKey::PlayerJump,
        SpriteKey::EnemyRed,
        SpriteKey::EnemyPurple,
        SpriteKey::EnemyPink,
        SpriteKey::Coin,
        SpriteKey::Goal,
        SpriteKey::ParticleCoin,
        SpriteKey::ParticleHit,
    ];

    /// File name under the sprite root
    pub fn file_name(self) -> &'static str {
        match self {
            SpriteKey::PlayerIdle => "player_idle.png",
            SpriteKey::PlayerRun => "player_run.png",
            SpriteKey::PlayerJump => "player_jump.png",
            SpriteKey::EnemyRed => "enemy_red.png",
            SpriteKey::EnemyPurple => "enemy_purple.png",
            SpriteKey::EnemyPink => "enemy_pink.png",
            SpriteKey::Coin => "coin.png",
            SpriteKey::Goal => "goal_flag.png",
            SpriteKey::ParticleCoin => "particle_gold.png",
            SpriteKey::ParticleHit => "particle_red.png",
        }
    }

    /// The shape drawn when no texture is available
    pub fn placeholder(self) -> Placeholder {
        match self {
            SpriteKey::PlayerIdle | SpriteKey::PlayerRun | SpriteKey::PlayerJump => {
                Placeholder::Player { body: hex(0xFF6B6B) }
            }
            SpriteKey::EnemyRed => Placeholder::Enemy { body: hex(0xDC143C) },
            SpriteKey::EnemyPurple => Placeholder::Enemy { body: hex(0x8A2BE2) },
            SpriteKey::EnemyPink => Placeholder::Enemy { body: hex(0xFF69B4) },
            SpriteKey::Coin => Placeholder::Coin,
            SpriteKey::Goal => Placeholder::Flag,
            SpriteKey::ParticleCoin => Placeholder::Square { color: hex(0xFFD700) },
            SpriteKey::ParticleHit => Placeholder::Circle { color: hex(0xFF4444) },
        }
    }
}

/// Procedural stand-in for a missing sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placeholder {
    /// Body with head and eyes
    Player { body: Color },
    /// Spiked body
    Enemy { body: Color },
    /// Gold disc with a shine
    Coin,
    /// Pole and pennant
    Flag,
    Square { color: Color },
    Circle { color: Color },
}

/// What the renderer gets back for a key
#[derive(Debug, Clone, Copy)]
pub enum Sprite<'a> {
    Texture(&'a Texture2D),
    Placeholder(Placeholder),
}

/// Color from a 0xRRGGBB literal
pub const fn hex(rgb: u32) -> Color {
    Color::new(
        ((rgb >> 16) & 0xFF) as f32 / 255.0,
        ((rgb >> 8) & 0xFF) as f32 / 255.0,
        (rgb & 0xFF) as f32 / 255.0,
        1.0,
    )
}

/// Decode PNG bytes into RGBA8 pixels
pub fn decode_sprite(bytes: &[u8]) -> Result<(u16, u16, Vec<u8>), AssetError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = img.dimensions();
    if width > MAX_SPRITE_SIZE || height > MAX_SPRITE_SIZE {
        return Err(AssetError::TooLarge { width, height });
    }
    Ok((width as u16, height as u16, img.into_raw()))
}

pub struct Assets {
    textures: HashMap<SpriteKey, Texture2D>,
}

impl Assets {
    /// Placeholders for every key
    pub fn placeholders() -> Self {
        Self { textures: HashMap::new() }
    }

    /// Load sprites according to the configured strategy
    pub async fn load(settings: &AssetSettings) -> Self {
        let mut assets = Self::placeholders();
        if settings.strategy == AssetStrategy::Placeholders {
            log::info!("Using placeholder sprites");
            return assets;
        }

        for key in SpriteKey::ALL {
            let path = format!("{}/{}", settings.root.trim_end_matches('/'), key.file_name());
            match load_texture_file(&path).await {
                Ok(texture) => {
                    assets.textures.insert(key, texture);
                }
                Err(e) => log::warn!("Sprite {:?} unavailable, using placeholder: {}", key, e),
            }
        }
        log::info!(
            "Loaded {}/{} sprites from {}",
            assets.textures.len(),
            SpriteKey::ALL.len(),
            settings.root
        );
        assets
    }

    pub fn sprite(&self, key: SpriteKey) -> Sprite<'_> {
        match self.textures.get(&key) {
            Some(texture) => Sprite::Texture(texture),
            None => Sprite::Placeholder(key.placeholder()),
        }
    }

    #[cfg(test)]
    pub fn loaded_count(&self) -> usize {
        self.textures.len()
    }
}

async fn load_texture_file(path: &str) -> Result<Texture2D, AssetError> {
    let bytes = load_file(path)
        .await
        .map_err(|e| AssetError::Read(format!("{}: {}", path, e)))?;
    let (width, height, pixels) = decode_sprite(&bytes)?;
    let texture = Texture2D::from_rgba8(width, height, &pixels);
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png).unwrap();
        bytes
    }

    #[test]
    fn test_decode_sprite() {
        let (w, h, pixels) = decode_sprite(&png(3, 2)).unwrap();
        assert_eq!((w, h), (3, 2));
        assert_eq!(pixels.len(), 3 * 2 * 4);
        assert_eq!(&pixels[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode_sprite(b"definitely not a png");
        assert!(matches!(result, Err(AssetError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_huge() {
        let result = decode_sprite(&png(MAX_SPRITE_SIZE + 1, 1));
        assert!(matches!(result, Err(AssetError::TooLarge { .. })));
    }

    #[test]
    fn test_every_key_has_placeholder() {
        let assets = Assets::placeholders();
        for key in SpriteKey::ALL {
            assert!(matches!(assets.sprite(key), Sprite::Placeholder(_)), "{:?}", key);
        }
        assert_eq!(assets.loaded_count(), 0);
    }

    #[test]
    fn test_placeholders_are_deterministic() {
        assert_eq!(SpriteKey::EnemyPink.placeholder(), Placeholder::Enemy { body: hex(0xFF69B4) });
        assert_eq!(SpriteKey::PlayerRun.placeholder(), SpriteKey::PlayerIdle.placeholder());
        assert_ne!(SpriteKey::EnemyRed.placeholder(), SpriteKey::EnemyPurple.placeholder());
    }

    #[test]
    fn test_file_names_unique() {
        let mut names: Vec<_> = SpriteKey::ALL.iter().map(|k| k.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), SpriteKey::ALL.len());
    }

    #[test]
    fn test_hex() {
        let c = hex(0xFF8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }
}
