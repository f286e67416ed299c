use textflow_traits::Direction;

use crate::config::SyncConfig;
use crate::document::Document;

/// Locales whose default text flow is right-to-left, by two-letter code.
pub const RTL_LOCALES: [&str; 9] = ["ar", "he", "fa", "ur", "yi", "ji", "ps", "sd", "ug"];

/// Attribute the applicator leaves on the root while it owns the `dir`
/// marker. Detection uses it to tell an author-set marker from the
/// engine's own write-back.
pub(crate) const MANAGED_ATTR: &str = "data-dir-managed";

/// Where an explicit `dir` marker was found.
///
/// The distinction matters to the applicator: only a root marker may take
/// over ownership of the root `dir` attribute. A container marker is
/// mirrored onto the root by the engine, and that mirror must stay flagged
/// as engine-written or it would shadow later container changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerSource {
    Root,
    Container,
}

/// Which signal decided a detection cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// An author-set `dir` attribute on root or container.
    ExplicitMarker(MarkerSource),
    /// A translation-widget marker class on the root.
    TranslationClass,
    /// Inference from the declared (or default) locale code.
    Locale,
    /// The container's rendered direction as recorded by the host.
    ComputedStyle,
    /// No signal found.
    Default,
}

/// A resolved direction together with the signal that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub direction: Direction,
    pub signal: Signal,
}

/// Resolves the document's direction from a fresh snapshot of its state.
///
/// Pure and infallible: reads the document, never mutates it, and always
/// returns one of the two directions. Signals are consulted in strict
/// priority order and the first match wins:
///
/// 1. An explicit `dir` attribute on the root (or, failing that, on the
///    container) whose value is exactly `ltr` or `rtl`, trusted verbatim.
///    An invalid value is ignored, not trusted. A root marker that the
///    applicator itself wrote back (flagged via [`MANAGED_ATTR`] and
///    matching the applied marker class) is skipped, so the engine keeps
///    following language changes instead of pinning itself to its own
///    output; an externally overridden value never matches and stays
///    authoritative.
/// 2. A translation-widget marker class on the root (`translated-rtl` /
///    `translated-ltr`). These outrank locale inference because they
///    reflect the *visible* translated language, not the page's original
///    declared one.
/// 3. The `lang` attribute (root, else container, else the configured
///    default): first two characters, lowercased, matched against
///    [`RTL_LOCALES`]. A match means right-to-left; a non-match falls
///    through rather than forcing left-to-right.
/// 4. The container's rendered direction, if the host has recorded one.
/// 5. Left-to-right.
pub fn resolve(doc: &Document, config: &SyncConfig) -> Resolution {
    if let Some((direction, source)) = explicit_marker(doc) {
        return Resolution {
            direction,
            signal: Signal::ExplicitMarker(source),
        };
    }

    let root = doc.root_id();
    if doc.has_class(root, "translated-rtl") {
        return Resolution {
            direction: Direction::Rtl,
            signal: Signal::TranslationClass,
        };
    }
    if doc.has_class(root, "translated-ltr") {
        return Resolution {
            direction: Direction::Ltr,
            signal: Signal::TranslationClass,
        };
    }

    let locale = doc
        .attr(root, "lang")
        .or_else(|| doc.container_id().and_then(|c| doc.attr(c, "lang")))
        .unwrap_or(config.default_locale.as_str());
    if locale_is_rtl(locale) {
        return Resolution {
            direction: Direction::Rtl,
            signal: Signal::Locale,
        };
    }

    if let Some(direction) = doc.computed_direction() {
        return Resolution {
            direction,
            signal: Signal::ComputedStyle,
        };
    }

    Resolution {
        direction: Direction::Ltr,
        signal: Signal::Default,
    }
}

/// [`resolve`] without the deciding signal.
pub fn detect(doc: &Document, config: &SyncConfig) -> Direction {
    resolve(doc, config).direction
}

fn explicit_marker(doc: &Document) -> Option<(Direction, MarkerSource)> {
    let parse = |id: usize| -> Option<Direction> {
        doc.attr(id, "dir").and_then(|v| v.parse().ok())
    };

    let root = doc.root_id();
    if let Some(dir) = parse(root) {
        let self_written = doc.attr(root, MANAGED_ATTR).is_some()
            && applied_marker(doc, root) == Some(dir);
        if !self_written {
            return Some((dir, MarkerSource::Root));
        }
    }
    // The engine never writes the container's marker, so it is always
    // author-provided.
    doc.container_id()
        .and_then(parse)
        .map(|dir| (dir, MarkerSource::Container))
}

/// The direction the applied marker classes on `id` claim, if they are in
/// a consistent state.
fn applied_marker(doc: &Document, id: usize) -> Option<Direction> {
    match (doc.has_class(id, "is-rtl"), doc.has_class(id, "is-ltr")) {
        (true, false) => Some(Direction::Rtl),
        (false, true) => Some(Direction::Ltr),
        _ => None,
    }
}

/// Whether a locale code infers right-to-left flow. Malformed or empty
/// codes never match.
fn locale_is_rtl(code: &str) -> bool {
    let prefix: String = code.chars().take(2).collect();
    if prefix.chars().count() < 2 {
        return false;
    }
    let prefix = prefix.to_lowercase();
    RTL_LOCALES.contains(&prefix.as_str())
}
