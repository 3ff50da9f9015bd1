use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fmt;

const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// A saved preference is dark only when it says so; anything else is light.
    pub fn from_saved(value: &str) -> Theme {
        if value.trim() == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme preference with explicit init and persist-on-change.
pub struct ThemeStore<S: Storage> {
    storage: S,
    current: Theme,
}

impl<S: Storage> ThemeStore<S> {
    /// 讀取已儲存的偏好，沒有儲存時使用預設值 (dark)
    pub async fn init(storage: S) -> Self {
        let current = match storage.read_file(THEME_KEY).await {
            Ok(bytes) => {
                let saved = String::from_utf8_lossy(&bytes);
                let theme = Theme::from_saved(&saved);
                if theme == Theme::Light && saved.trim() != "light" {
                    tracing::warn!("Unknown saved theme '{}', using light", saved.trim());
                }
                theme
            }
            Err(e) => {
                tracing::debug!("No saved theme ({}), using default", e);
                Theme::default()
            }
        };
        Self { storage, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub async fn set(&mut self, theme: Theme) -> Result<()> {
        self.storage
            .write_file(THEME_KEY, theme.as_str().as_bytes())
            .await?;
        self.current = theme;
        tracing::debug!("Theme set to {}", theme);
        Ok(())
    }

    pub async fn toggle(&mut self) -> Result<Theme> {
        let next = self.current.toggled();
        self.set(next).await?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::LocalStorage;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_default_then_persist_toggle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_str().unwrap().to_string();

        let mut store = ThemeStore::init(LocalStorage::new(path.clone())).await;
        assert_eq!(store.current(), Theme::Dark);
        assert_eq!(store.toggle().await.unwrap(), Theme::Light);

        let reloaded = ThemeStore::init(LocalStorage::new(path)).await;
        assert_eq!(reloaded.current(), Theme::Light);
    }

    #[tokio::test]
    async fn test_unknown_saved_value_means_light() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("theme"), "sepia").unwrap();

        let store = ThemeStore::init(LocalStorage::new(dir.path())).await;
        assert_eq!(store.current(), Theme::Light);
    }

    #[test]
    fn test_from_saved() {
        assert_eq!(Theme::from_saved("dark\n"), Theme::Dark);
        assert_eq!(Theme::from_saved("light"), Theme::Light);
        assert_eq!(Theme::from_saved(""), Theme::Light);
    }
}
