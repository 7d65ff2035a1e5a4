//! Thin wrappers over `window.location` used outside the router.

/// Full-page navigation. Drops all in-memory state, which is what logout and
/// external checkout want.
pub fn redirect(href: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.location().set_href(href) {
                tracing::error!(?err, href, "navigation failed");
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::info!(href, "redirect requested");
    }
}

/// The URL fragment (`#...`) of the current page, if any.
pub fn location_hash() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let hash = web_sys::window()?.location().hash().ok()?;
        if hash.is_empty() {
            None
        } else {
            Some(hash)
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Path and query of the current page, `/` when unknown.
pub fn current_path() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let path = web_sys::window().and_then(|window| {
            let location = window.location();
            let pathname = location.pathname().ok()?;
            let search = location.search().unwrap_or_default();
            Some(format!("{pathname}{search}"))
        });
        path.unwrap_or_else(|| "/".to_string())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        "/".to_string()
    }
}

/// 128 bits from the platform CSPRNG, hex encoded. `None` when the browser
/// exposes no `crypto`.
pub fn random_token() -> Option<String> {
    let mut bytes = [0u8; 16];
    #[cfg(target_arch = "wasm32")]
    {
        let crypto = web_sys::window()?.crypto().ok()?;
        crypto.get_random_values_with_u8_array(&mut bytes).ok()?;
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use rand::RngCore;
        rand::thread_rng().fill_bytes(&mut bytes);
    }
    Some(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_token_is_fresh_hex() {
        let a = random_token().unwrap();
        let b = random_token().unwrap();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
