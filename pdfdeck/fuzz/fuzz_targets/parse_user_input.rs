#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfdeck::config::PageSpan;
use pdfdeck::deck::Deck;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Any span that parses is non-empty and prints back to itself.
    if let Ok(span) = s.parse::<PageSpan>() {
        assert!(span.start() >= 1);
        assert!(span.start() <= span.end());
        assert_eq!(span.to_string().parse::<PageSpan>().ok(), Some(span));
    }

    // A deck read from arbitrary JSON never keeps duplicates once rebuilt.
    if let Ok(deck) = serde_json::from_str::<Deck>(s) {
        let rebuilt = Deck::from_paths(deck.files().to_vec());
        for (i, path) in rebuilt.files().iter().enumerate() {
            assert!(!rebuilt.files()[i + 1..].contains(path));
        }
    }
});
