//! Menu File Loader

use std::io::ErrorKind;
use std::path::Path;

use crate::domain::entity::menu::{Coffee, Menu};
use crate::error::{OrderError, OrderResult};

/// Load the menu from a JSON array of coffees.
///
/// A missing file gives an empty menu. Unreadable or malformed files are
/// errors.
pub async fn load_menu(path: impl AsRef<Path>) -> OrderResult<Menu> {
    let path = path.as_ref();

    let data = match tokio::fs::read_to_string(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Menu file not found; serving an empty menu");
            return Ok(Menu::default());
        }
        Err(e) => {
            return Err(OrderError::Menu(format!("{}: {}", path.display(), e)));
        }
    };

    let coffees: Vec<Coffee> = serde_json::from_str(&data)
        .map_err(|e| OrderError::Menu(format!("{}: {}", path.display(), e)))?;

    tracing::info!(path = %path.display(), items = coffees.len(), "Menu loaded");
    Ok(Menu::new(coffees))
}
