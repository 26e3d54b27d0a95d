//! Fixed narrative content: riddles, volume titles and the librarian's story.

/// Number of hidden volumes the player must find.
pub const BOOK_COUNT: usize = 3;

/// Riddle shown while hunting for each volume, in presentation order.
pub const RIDDLES: [&str; BOOK_COUNT] = [
    "Where shadows dance with ancient light, and wisdom sleeps in endless night, seek the tome where silence screams, between the realms of waking dreams.",
    "In corners deep where fungi glow, the forgotten words continue to grow, where green meets stone and time stands still, a secret waits against your will.",
    "Above the ground where mortals tread, the highest shelf guards words long dead, climb with eyes toward heaven's door, where dust remembers evermore.",
];

/// Titles of the three volumes Elara sheltered, one per book identity.
pub const BOOK_TITLES: [&str; BOOK_COUNT] = [
    "the Book of Forgotten Names",
    "the Codex of Eternal Twilight",
    "the Chronicle of Silent Voices",
];

/// Heading of the story reveal.
pub const STORY_TITLE: &str = "The Librarian's Story";

/// Revealed once every volume has been found.
pub const LIBRARIAN_STORY: &str = "I was Elara, keeper of this sanctuary of stories. For forty years, I catalogued every whisper, every tale, every secret these walls would hold. On the night of the great fire, I refused to leave—how could I abandon my life's work? I stayed, sheltering three precious volumes: the Book of Forgotten Names, the Codex of Eternal Twilight, and the Chronicle of Silent Voices. The flames took my mortal form, but my devotion bound me here. Now I am the library, and the library is me. These three books hold fragments of my soul, scattered to protect them from oblivion. Find them, dear visitor, and you shall know my truth. Read my story, remember my name, and perhaps... I can finally rest.";

/// Hover prompt on the central glowing book.
pub const CENTRAL_BOOK_HOVER: &str = "Touch the glowing book to hear its whisper...";

/// Hover prompt on each hidden volume.
pub const KEY_BOOK_HOVER: &str = "Examine the mysterious book...";

/// Shown before the first riddle has been heard.
pub const INSTRUCTION_TEXT: &str = "Approach the glowing book in the center to hear its whisper...";

/// Logged once when a session starts.
pub const INTRO_LINE: &str =
    "The Echoing Library has been initialized. Find the three hidden books to uncover the librarian's story!";

/// Riddle text for `index`, if it names one of the fixed riddles.
pub fn riddle(index: usize) -> Option<&'static str> {
    RIDDLES.get(index).copied()
}

/// Title of the volume bound to `book_index`.
pub fn book_title(book_index: usize) -> Option<&'static str> {
    BOOK_TITLES.get(book_index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_names_every_volume() {
        for title in BOOK_TITLES {
            assert!(LIBRARIAN_STORY.contains(title), "story is missing {title}");
        }
    }

    #[test]
    fn story_keeps_its_wording() {
        assert!(LIBRARIAN_STORY.contains("I refused to leave\u{2014}how could I abandon my life's work?"));
        assert!(LIBRARIAN_STORY.ends_with("perhaps... I can finally rest."));
    }

    #[test]
    fn out_of_range_lookups_are_none() {
        assert!(riddle(BOOK_COUNT).is_none());
        assert!(book_title(7).is_none());
        assert_eq!(riddle(0), Some(RIDDLES[0]));
    }
}
