use daybook_core::{
    FontStyle, FontWeight, NoteRecord, NoteValidationError, DEFAULT_CARD_COLOR, FONT_FAMILIES,
};
use serde_json::json;

#[test]
fn default_record_matches_editor_defaults() {
    let record = NoteRecord::default();
    assert_eq!(record.note, "");
    assert_eq!(record.card_color, DEFAULT_CARD_COLOR);
    assert_eq!(record.card_color, "#F37199");
    assert_eq!(record.font_weight, FontWeight::Normal);
    assert_eq!(record.font_style, FontStyle::Normal);
    assert_eq!(record.font_family, "sans-serif");
    assert_eq!(record.image_uri, None);
}

#[test]
fn default_record_passes_validation() {
    NoteRecord::default().validate().unwrap();
}

#[test]
fn empty_note_body_is_valid() {
    let record = NoteRecord::new("");
    record.validate().unwrap();
}

#[test]
fn validation_rejects_non_hex_card_color() {
    for color in ["F37199", "#F3719", "#GG0000", "pink", "#F371991"] {
        let mut record = NoteRecord::default();
        record.card_color = color.to_string();
        assert!(
            matches!(
                record.validate(),
                Err(NoteValidationError::InvalidCardColor(_))
            ),
            "expected `{color}` to be rejected"
        );
    }
}

#[test]
fn validation_rejects_unknown_font_family() {
    let mut record = NoteRecord::default();
    record.font_family = "Wingdings".to_string();
    assert!(matches!(
        record.validate(),
        Err(NoteValidationError::UnknownFontFamily(_))
    ));
}

#[test]
fn validation_accepts_every_fixed_font_family() {
    for family in FONT_FAMILIES {
        let mut record = NoteRecord::default();
        record.font_family = family.to_string();
        record.validate().unwrap();
    }
}

#[test]
fn validation_rejects_blank_image_uri() {
    let mut record = NoteRecord::default();
    record.image_uri = Some("   ".to_string());
    assert_eq!(record.validate(), Err(NoteValidationError::BlankImageUri));
}

#[test]
fn font_toggles_flip_between_both_values() {
    assert_eq!(FontWeight::Normal.toggled(), FontWeight::Bold);
    assert_eq!(FontWeight::Bold.toggled(), FontWeight::Normal);
    assert_eq!(FontStyle::Normal.toggled(), FontStyle::Italic);
    assert_eq!(FontStyle::Italic.toggled(), FontStyle::Normal);
}

#[test]
fn record_serializes_to_the_stored_camel_case_layout() {
    let record = NoteRecord::new("Hello");
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(
        value,
        json!({
            "note": "Hello",
            "cardColor": "#F37199",
            "fontWeight": "normal",
            "fontStyle": "normal",
            "fontFamily": "sans-serif",
            "imageUri": null,
        })
    );
}

#[test]
fn record_with_image_round_trips_through_json() {
    let mut record = NoteRecord::new("walked to the market");
    record.font_weight = FontWeight::Bold;
    record.font_style = FontStyle::Italic;
    record.font_family = "Georgia".to_string();
    record.image_uri = Some("file:///photos/market.jpg".to_string());

    let body = serde_json::to_string(&record).unwrap();
    let decoded: NoteRecord = serde_json::from_str(&body).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn record_decodes_when_image_field_is_missing() {
    // Bodies written before an image was ever attached may omit the field.
    let decoded: NoteRecord = serde_json::from_value(json!({
        "note": "no picture today",
        "cardColor": "#F37199",
        "fontWeight": "bold",
        "fontStyle": "normal",
        "fontFamily": "serif",
    }))
    .unwrap();
    assert_eq!(decoded.image_uri, None);
    assert_eq!(decoded.font_weight, FontWeight::Bold);
}
