//! Typing through a simulated host: the field must always end up holding
//! exactly what the engine thinks was typed.

use libviet::host::{KeyboardHook, RawKey, SimulatedField};
use libviet::{keycodes, Action, Engine, InputScheme, VietConfig};

fn field(scheme: InputScheme) -> SimulatedField {
    let mut config = VietConfig::default();
    config.scheme = scheme;
    SimulatedField::new(Engine::with_config(config))
}

fn typed(scheme: InputScheme, keys: &str) -> String {
    let mut field = field(scheme);
    field.type_keys(keys, Some('<'));
    assert_eq!(field.text(), field.engine().get_full_buffer());
    field.text().to_string()
}

#[test]
fn test_telex_sentences() {
    let telex = |keys| typed(InputScheme::Telex, keys);
    assert_eq!(telex("xin chaof cacs banj"), "xin chào các bạn");
    assert_eq!(telex("tieengs vieetj"), "tiếng việt");
    assert_eq!(telex("ddaay laf"), "đây là");
    assert_eq!(telex("Vieetj Nam"), "Việt Nam");
}

#[test]
fn test_vni_words() {
    let vni = |keys| typed(InputScheme::Vni, keys);
    assert_eq!(vni("vie65t"), "việt");
    assert_eq!(vni("tie61ng"), "tiếng");
    assert_eq!(vni("d9a6y"), "đây");
}

#[test]
fn test_backspace_undoes_one_step() {
    assert_eq!(typed(InputScheme::Telex, "vieetj<"), "viêt");
    assert_eq!(typed(InputScheme::Telex, "vieetj<<"), "viê");
    assert_eq!(typed(InputScheme::Telex, "ab <<"), "a");
}

#[test]
fn test_only_transforming_keys_are_consumed() {
    let mut field = field(InputScheme::Telex);
    let results = field.type_str("as");
    assert!(!results[0].key_consumed());
    assert_eq!(results[0].action(), Some(Action::None));
    assert!(results[1].key_consumed());
    assert_eq!(results[1].action(), Some(Action::Replace));
    assert_eq!(results[1].backspace, 1);
    assert_eq!(results[1].text(), "á");
}

#[test]
fn test_mapped_char_wins_over_key_code() {
    // Every key reports the same QWERTY position; the layout decides
    let mut field = field(InputScheme::Telex);
    for ch in "chaof".chars() {
        field.press(RawKey {
            keycode: keycodes::Q,
            caps: false,
            ctrl: false,
            ch: Some(ch),
        });
    }
    assert_eq!(field.text(), "chào");
}

#[test]
fn test_scheme_switch_mid_word() {
    let mut field = field(InputScheme::Telex);
    field.type_str("xin ");
    field.engine_mut().set_scheme(InputScheme::Vni);
    field.type_str("cha2o");
    assert_eq!(field.text(), "xin chào");
    assert_eq!(field.engine().scheme(), InputScheme::Vni);
}

#[test]
fn test_navigation_freezes_syllable() {
    let mut field = field(InputScheme::Telex);
    field.type_str("ca");
    field.press(RawKey::code(keycodes::LEFT));
    let result = field.press(RawKey::from_char('s'));
    assert!(!result.key_consumed());
    assert!(field.engine().get_full_buffer().ends_with("cas"));
}

#[test]
fn test_reset_on_focus_change() {
    let mut field = field(InputScheme::Telex);
    field.type_str("ddi");
    field.reset();
    field.type_str("as");
    assert_eq!(field.text(), "á");
}

#[test]
fn test_layout_independent_key_codes() {
    // Arbitrary positions, some of them editing keys on QWERTY; the
    // character the layout reports decides
    let words = [
        ("as", "á"),
        ("viets", "viét"),
        ("aa", "â"),
        ("ddaay", "đây"),
        ("nghieeng", "nghiêng"),
    ];
    for (keys, expected) in words {
        let mut field = field(InputScheme::Telex);
        for (i, ch) in keys.chars().enumerate() {
            field.press(RawKey {
                keycode: ((i * 7) % 50) as u16,
                caps: false,
                ctrl: false,
                ch: Some(ch),
            });
        }
        assert_eq!(field.text(), expected, "{keys}");
        assert_eq!(field.engine().get_full_buffer(), expected, "{keys}");
    }

    let mut field = field(InputScheme::Telex);
    field.press(RawKey {
        keycode: keycodes::SPACE,
        caps: false,
        ctrl: false,
        ch: Some('g'),
    });
    assert_eq!(field.text(), "g");
}

#[test]
fn test_scheme_switch_keeps_field_in_sync() {
    let mut field = field(InputScheme::Telex);
    field.type_str("ddaay vie");
    field.engine_mut().set_scheme(InputScheme::Vni);
    assert_eq!(field.engine().get_full_buffer(), "đây vie");

    field.press(RawKey::backspace());
    assert_eq!(field.text(), "đây vi");
    assert_eq!(field.engine().get_full_buffer(), field.text());
}

#[test]
fn test_toggle_keeps_field_in_sync() {
    let mut field = field(InputScheme::Telex);
    field.type_str("as");
    field.engine_mut().set_enabled(false);
    field.engine_mut().set_enabled(true);
    field.type_keys("<", Some('<'));
    assert_eq!(field.text(), "");
    assert_eq!(field.engine().get_full_buffer(), "");
}

#[test]
fn test_vowel_cluster_with_final_stays_literal() {
    let telex = |keys| typed(InputScheme::Telex, keys);
    assert_eq!(telex("caumf"), "caumf");
    assert_eq!(telex("aons"), "aons");
    assert_eq!(telex("eons"), "eons");
    assert_eq!(telex("ains"), "ains");
    assert_eq!(telex("oims"), "oims");
    // uâ and oă before their mark still take a final
    assert_eq!(telex("tuaans"), "tuấn");
    assert_eq!(telex("xoawn"), "xoăn");
}

#[test]
fn test_auto_restore_through_host() {
    let mut config = VietConfig::default();
    config.base.auto_restore = true;
    let mut field = SimulatedField::new(Engine::with_config(config));
    field.type_str("cursor person error issue tesst ");
    assert_eq!(field.text(), "cursor person error issue test ");
    assert_eq!(field.engine().get_full_buffer(), field.text());
}
