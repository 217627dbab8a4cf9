use relink_core::{select_description, FieldChoice, FieldConfidence, FieldSelectError};

#[test]
fn content_signal_beats_position() {
    let texts = ["عنوان الفيديو", "نص آخر", "رابط الماب: هنا"];
    let choice = select_description(&texts).unwrap();
    assert_eq!(
        choice,
        FieldChoice {
            index: 2,
            confidence: FieldConfidence::Matched
        }
    );
}

#[test]
fn legacy_link_counts_as_content_signal() {
    let texts = ["عنوان", "شاهد https://www.roblox.com/games/42/x"];
    let choice = select_description(&texts).unwrap();
    assert_eq!(choice.index, 1);
    assert_eq!(choice.confidence, FieldConfidence::Matched);
}

#[test]
fn two_signal_less_regions_select_the_second() {
    let texts = ["عنوان الفيديو", "وصف عادي"];
    let choice = select_description(&texts).unwrap();
    assert_eq!(
        choice,
        FieldChoice {
            index: 1,
            confidence: FieldConfidence::Positional
        }
    );
}

#[test]
fn sole_region_is_used_with_low_confidence() {
    let choice = select_description(&["النص الوحيد"]).unwrap();
    assert_eq!(choice.index, 0);
    assert_eq!(choice.confidence, FieldConfidence::SoleCandidate);
}

#[test]
fn zero_regions_fail() {
    assert_eq!(
        select_description(&[]),
        Err(FieldSelectError::FieldNotFound { region_count: 0 })
    );
}

#[test]
fn three_or_more_signal_less_regions_fail() {
    let texts = ["أ", "ب", "ج"];
    assert_eq!(
        select_description(&texts),
        Err(FieldSelectError::FieldNotFound { region_count: 3 })
    );

    let texts = ["أ", "ب", "ج", "د"];
    assert!(select_description(&texts).is_err());
}
