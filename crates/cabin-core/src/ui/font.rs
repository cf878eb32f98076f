//! Process-wide font cache
//!
//! Widgets ask for faces through [`regular`] and [`bold`]. Faces are looked
//! up once and kept for the life of the process; [`clear_cache`] resets the
//! cache so tests can observe a cold start.

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_graphics::mono_font::{MonoFont, ascii, iso_8859_5};

/// Faces the widgets draw with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    /// Body text, covers Latin and Cyrillic
    Regular,
    /// Bold face for ASCII-only text
    BoldAscii,
    /// Bold face with Cyrillic coverage
    BoldUnicode,
}

impl FontFace {
    fn load(self) -> &'static MonoFont<'static> {
        match self {
            FontFace::Regular => &iso_8859_5::FONT_10X20,
            FontFace::BoldAscii => &ascii::FONT_9X18_BOLD,
            FontFace::BoldUnicode => &iso_8859_5::FONT_9X18_BOLD,
        }
    }

    /// Bold face able to render `text`
    pub fn bold_for(text: &str) -> Self {
        if text.is_ascii() {
            FontFace::BoldAscii
        } else {
            FontFace::BoldUnicode
        }
    }
}

#[derive(Default)]
struct FontCache {
    regular: Option<&'static MonoFont<'static>>,
    bold_ascii: Option<&'static MonoFont<'static>>,
    bold_unicode: Option<&'static MonoFont<'static>>,
}

impl FontCache {
    const fn new() -> Self {
        Self {
            regular: None,
            bold_ascii: None,
            bold_unicode: None,
        }
    }

    #[cfg(test)]
    fn slot(&self, face: FontFace) -> &Option<&'static MonoFont<'static>> {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::BoldAscii => &self.bold_ascii,
            FontFace::BoldUnicode => &self.bold_unicode,
        }
    }

    fn slot_mut(&mut self, face: FontFace) -> &mut Option<&'static MonoFont<'static>> {
        match face {
            FontFace::Regular => &mut self.regular,
            FontFace::BoldAscii => &mut self.bold_ascii,
            FontFace::BoldUnicode => &mut self.bold_unicode,
        }
    }

    fn get(&mut self, face: FontFace) -> &'static MonoFont<'static> {
        *self.slot_mut(face).get_or_insert_with(|| {
            log::trace!("Loading font face {:?}", face);
            face.load()
        })
    }

    #[cfg(test)]
    fn is_loaded(&self, face: FontFace) -> bool {
        self.slot(face).is_some()
    }

    fn clear(&mut self) {
        *self = Self::new();
    }
}

static CACHE: Mutex<RefCell<FontCache>> = Mutex::new(RefCell::new(FontCache::new()));

/// Fetch a face, loading it on first use
pub fn get(face: FontFace) -> &'static MonoFont<'static> {
    critical_section::with(|cs| CACHE.borrow_ref_mut(cs).get(face))
}

/// The regular body face
pub fn regular() -> &'static MonoFont<'static> {
    get(FontFace::Regular)
}

/// The bold face that can render `text`
pub fn bold(text: &str) -> &'static MonoFont<'static> {
    get(FontFace::bold_for(text))
}

/// Drop every cached face
pub fn clear_cache() {
    critical_section::with(|cs| CACHE.borrow_ref_mut(cs).clear());
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::geometry::Size;
    use embedded_graphics::mono_font::mapping::GlyphMapping;

    #[test]
    fn test_bold_face_selection() {
        assert_eq!(FontFace::bold_for("Display"), FontFace::BoldAscii);
        assert_eq!(FontFace::bold_for("Дисплей"), FontFace::BoldUnicode);
        assert_eq!(FontFace::bold_for(""), FontFace::BoldAscii);
    }

    #[test]
    fn test_bold_face_covers_text() {
        assert_eq!(
            bold("Звук").glyph_mapping.index('Ж'),
            iso_8859_5::FONT_9X18_BOLD.glyph_mapping.index('Ж')
        );
        assert_eq!(
            bold("Sound").glyph_mapping.index('S'),
            ascii::FONT_9X18_BOLD.glyph_mapping.index('S')
        );
        assert_eq!(bold("Sound").character_size, Size::new(9, 18));
        assert_eq!(regular().character_size, Size::new(10, 20));
    }

    #[test]
    fn test_cache_loads_once_and_clears() {
        let mut cache = FontCache::new();
        assert!(!cache.is_loaded(FontFace::Regular));

        let first = cache.get(FontFace::Regular);
        assert!(cache.is_loaded(FontFace::Regular));
        assert!(!cache.is_loaded(FontFace::BoldUnicode));
        assert!(core::ptr::eq(first, cache.get(FontFace::Regular)));

        cache.get(FontFace::BoldAscii);
        cache.clear();
        assert!(!cache.is_loaded(FontFace::Regular));
        assert!(!cache.is_loaded(FontFace::BoldAscii));

        assert_eq!(cache.get(FontFace::Regular).character_size, Size::new(10, 20));
    }

    #[test]
    fn test_global_cache_reloads_after_clear() {
        clear_cache();
        assert_eq!(regular().character_size, Size::new(10, 20));
    }
}
