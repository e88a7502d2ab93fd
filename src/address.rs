use bevy::prelude::*;

use crate::CursorSettings;

/// Text currently held by the address bar entity.
#[derive(Component, Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressBar {
    pub text: String,
}

/// Address bar submission (Go button, IME "go" or "done").
#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct AddressSubmitted {
    pub text: String,
}

/// Request for the fallback surface to load `url`.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct LoadDestination {
    pub surface: Entity,
    pub url: String,
}

/// Turns free address bar text into a loadable URL.
///
/// Empty input yields `home`. Text without whitespace that contains a dot or
/// starts with `http` is an address and gets `https://` unless it already has
/// an http(s) scheme. Anything else is a search query appended to
/// `search_template`.
pub fn normalize_address(input: &str, home: &str, search_template: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return home.to_owned();
    }

    let looks_like_url = !trimmed.contains(char::is_whitespace)
        && (trimmed.contains('.') || trimmed.starts_with("http"));
    if !looks_like_url {
        return format!("{search_template}{}", percent_encode(trimmed));
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    }
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn percent_encode(text: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut encoded = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push('%');
                encoded.push(HEX[usize::from(byte >> 4)] as char);
                encoded.push(HEX[usize::from(byte & 0x0f)] as char);
            }
        }
    }
    encoded
}

pub(crate) fn submit_address(
    mut submissions: MessageReader<AddressSubmitted>,
    surfaces: Query<Entity, With<crate::FallbackSurface>>,
    settings: Res<CursorSettings>,
    mut loads: MessageWriter<LoadDestination>,
) {
    for submission in submissions.read() {
        let Some(surface) = surfaces.iter().next() else {
            warn!("Address submitted but no fallback surface exists.");
            continue;
        };
        let url = normalize_address(&submission.text, &settings.home, &settings.search_template);
        info!("Loading {url}");
        loads.write(LoadDestination { surface, url });
    }
}

/// Loads the home page on newly added surfaces.
pub(crate) fn load_home_on_new_surface(
    surfaces: Query<Entity, Added<crate::FallbackSurface>>,
    settings: Res<CursorSettings>,
    mut loads: MessageWriter<LoadDestination>,
) {
    for surface in &surfaces {
        loads.write(LoadDestination {
            surface,
            url: settings.home.clone(),
        });
    }
}

/// Mirrors the last requested destination into every address bar.
pub(crate) fn mirror_destination_in_address_bar(
    mut loads: MessageReader<LoadDestination>,
    mut bars: Query<&mut AddressBar>,
) {
    let Some(load) = loads.read().last() else {
        return;
    };
    for mut bar in &mut bars {
        if bar.text != load.url {
            bar.text.clone_from(&load.url);
        }
    }
}
