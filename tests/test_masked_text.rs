use rat_mask::{upos_type, Mask, MaskError, MaskOutcome, MaskState, MaskTarget, MaskedText, ReMasked};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;


#[derive(Debug, Default)]
struct Field {
    text: String,
    caret: upos_type,
    updates: usize,
}

impl MaskTarget for Field {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.updates += 1;
    }

    fn set_caret(&mut self, caret: upos_type) {
        self.caret = caret;
    }
}

#[test]
fn test_mask_input() -> Result<(), anyhow::Error> {
    lib_test::setup_logging()?;

    let mut m = MaskedText::new(Mask::new("##-##"))?;
    m.set_text("12345");
    assert_eq!(m.text(), "12-34");
    assert_eq!(m.raw_input(), "1234");
    Ok(())
}

#[test]
fn test_typing() -> Result<(), anyhow::Error> {
    lib_test::setup_logging()?;

    let field = Rc::new(RefCell::new(Field::default()));
    let mut m = MaskedText::new(Mask::new("##/##/####"))?;
    m.set_target(&field);

    // fits the mask, no update
    assert_eq!(m.text_changed("2"), MaskOutcome::Accepted);
    assert_eq!(field.borrow().updates, 0);

    assert_eq!(
        m.text_changed("24"),
        MaskOutcome::Remasked(ReMasked::new("24/", 3))
    );
    assert_eq!(field.borrow().text, "24/");
    assert_eq!(field.borrow().caret, 3);

    assert_eq!(m.text_changed("24/1"), MaskOutcome::Accepted);
    m.text_changed("24/12");
    m.text_changed("24/12/1999");
    assert_eq!(m.text(), "24/12/1999");
    assert_eq!(m.raw_input(), "24121999");

    // too long
    m.text_changed("24/12/19990");
    assert_eq!(m.text(), "24/12/1999");
    assert_eq!(field.borrow().text, "24/12/1999");
    Ok(())
}

#[test]
fn test_edit_middle() -> Result<(), anyhow::Error> {
    let field = Rc::new(RefCell::new(Field::default()));
    let mut m = MaskedText::new(Mask::new_with("##-#--#", '#', false))?;
    m.set_target(&field);

    m.set_text("abcd");
    assert_eq!(m.text(), "ab-c--d");
    assert_eq!(field.borrow().caret, 7);

    // remove the separator between c and d
    m.text_changed("ab-c-d");
    assert_eq!(m.text(), "ab-d--");
    assert_eq!(field.borrow().text, "ab-d--");
    assert_eq!(field.borrow().caret, 3);
    assert_eq!(m.raw_input(), "abd");
    Ok(())
}

#[test]
fn test_dropped_target() -> Result<(), anyhow::Error> {
    let mut m = MaskedText::new(Mask::new("##-##"))?;
    {
        let field = Rc::new(RefCell::new(Field::default()));
        m.set_target(&field);
        m.set_text("123");
        assert_eq!(field.borrow().text, "12-3");
    }
    // target is gone
    let r = m.set_text("12-345");
    assert_eq!(r, MaskOutcome::Remasked(ReMasked::new("12-34", 5)));
    assert_eq!(m.text(), "12-34");

    m.clear_target();
    m.set_text("1");
    assert_eq!(m.text(), "1");
    Ok(())
}

#[test]
fn test_target_busy() -> Result<(), anyhow::Error> {
    let field = Rc::new(RefCell::new(Field::default()));
    let mut m = MaskedText::new(Mask::new("##-##"))?;
    m.set_target(&field);

    {
        let _busy = field.borrow_mut();
        let r = m.set_text("123");
        assert_eq!(r, MaskOutcome::Remasked(ReMasked::new("12-3", 4)));
        assert_eq!(m.text(), "12-3");
    }
    assert_eq!(field.borrow().updates, 0);
    assert_eq!(field.borrow().text, "");

    m.set_text("12-345");
    assert_eq!(field.borrow().updates, 1);
    assert_eq!(field.borrow().text, "12-34");
    Ok(())
}

#[test]
fn test_target_caret_graphemes() -> Result<(), anyhow::Error> {
    let field = Rc::new(RefCell::new(Field::default()));
    let mut m = MaskedText::new(Mask::new("##-##-#"))?;
    m.set_target(&field);

    m.set_text("12");
    assert_eq!(field.borrow().caret, 3);

    // combining mark after the separator
    let r = m.text_changed("12-\u{301}");
    assert_eq!(r, MaskOutcome::Accepted);
    let r = m.text_changed("12-\u{301}3");
    assert_eq!(r, MaskOutcome::Remasked(ReMasked::new("12-\u{301}3-", 6)));
    assert_eq!(m.raw_input(), "12\u{301}3");
    assert_eq!(field.borrow().text, "12-\u{301}3-");
    // `-` + combining mark is one grapheme
    assert_eq!(field.borrow().caret, 5);
    Ok(())
}

#[test]
fn test_mask_hash() {
    let mut set = HashSet::new();
    set.insert(Mask::new("##-##"));
    set.insert(Mask::new_with("##-##", '#', true));
    set.insert(Mask::from_config("##-##", Default::default()));
    assert_eq!(set.len(), 1);

    set.insert(Mask::new_with("##-##", '#', false));
    set.insert(Mask::new_with("##-##", '$', true));
    set.insert(Mask::new("##/##"));
    assert_eq!(set.len(), 4);
    assert!(set.contains(&Mask::new("##/##")));
}

#[test]
fn test_invalid_mask() {
    assert_eq!(
        MaskedText::new(Mask::new("AA-AA")).err(),
        Some(MaskError::PlaceholderMissing("AA-AA".into(), '#'))
    );
    assert!(MaskedText::new(Mask::new("")).is_ok());
    assert!(MaskedText::new(Mask::new_with("AA-AA", 'A', true)).is_ok());
    // placeholder with a combining mark is still a slot
    let mut m = MaskedText::new(Mask::new("#\u{301}")).expect("mask");
    m.set_text("ab");
    assert_eq!(m.text(), "a\u{301}");
    assert_eq!(m.raw_input(), "a");
    assert_eq!(
        MaskedText::new(Mask::new("e\u{301}")).err(),
        Some(MaskError::PlaceholderMissing("e\u{301}".into(), '#'))
    );

    let mut m = MaskedText::default();
    m.set_text("123");
    assert!(m.set_mask("xx").is_err());
    assert_eq!(m.mask(), &Mask::empty());
    assert_eq!(m.text(), "123");
    assert_eq!(
        MaskError::PlaceholderMissing("xx".into(), '#').to_string(),
        "mask \"xx\" does not contain the placeholder '#'"
    );
}

#[test]
fn test_change_mask() -> Result<(), anyhow::Error> {
    let field = Rc::new(RefCell::new(Field::default()));
    let mut m = MaskedText::new(Mask::new("##-##"))?;
    m.set_target(&field);
    m.set_text("1234");
    assert_eq!(m.text(), "12-34");

    m.set_mask("(##) ##")?;
    assert_eq!(m.text(), "(12) 34");
    assert_eq!(field.borrow().text, "(12) 34");
    assert_eq!(field.borrow().caret, 7);

    m.set_mask_with_placeholder("$/$/$/$", '$')?;
    assert_eq!(m.text(), "1/2/3/4");
    assert_eq!(m.mask().placeholder_char(), '$');

    m.set_mask_value(Mask::new("#.#"))?;
    assert_eq!(m.text(), "1.2");
    assert_eq!(m.raw_input(), "12");

    m.remove_mask();
    assert_eq!(m.mask().pattern_str(), "");
    assert!(!m.mask().is_length_enforced());
    assert_eq!(m.text(), "12");
    m.set_text("12345");
    assert_eq!(m.text(), "12345");
    Ok(())
}

#[test]
fn test_enforce_length() -> Result<(), anyhow::Error> {
    let mut m = MaskedText::new(Mask::new_with("##-##", '#', false))?;
    m.set_text("123456");
    assert_eq!(m.text(), "12-3456");
    assert_eq!(m.raw_input(), "123456");

    m.set_enforce_length(true);
    assert_eq!(m.text(), "12-34");
    assert_eq!(m.raw_input(), "1234");

    m.set_enforce_length(false);
    assert_eq!(m.text(), "12-34");
    Ok(())
}

#[test]
fn test_save_restore() -> Result<(), anyhow::Error> {
    let mut m = MaskedText::new(Mask::new("##-##"))?;
    m.set_text("12345");

    let state = m.save_state();
    assert_eq!(
        state,
        MaskState {
            pattern: "##-##".into(),
            placeholder: '#',
            enforce_length: true,
            raw: "1234".into(),
        }
    );

    let m2 = MaskedText::from_state(state.clone())?;
    assert_eq!(m2.text(), "12-34");
    assert_eq!(m2.raw_input(), "1234");
    assert_eq!(m2.mask(), m.mask());

    let mut m3 = MaskedText::default();
    let bad = MaskState {
        pattern: "xx".into(),
        ..state
    };
    assert!(m3.restore_state(bad).is_err());
    assert_eq!(m3.mask(), &Mask::empty());
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_state() -> Result<(), anyhow::Error> {
    let mut m = MaskedText::new(Mask::new("+### (##) ###-###"))?;
    m.set_text("38970123456");
    assert_eq!(m.text(), "+389 (70) 123-456");

    let json = serde_json::to_string(&m.save_state())?;
    let state: MaskState = serde_json::from_str(&json)?;
    let m2 = MaskedText::from_state(state)?;
    assert_eq!(m2.text(), "+389 (70) 123-456");

    let json = serde_json::to_string(m.mask())?;
    let mask: Mask = serde_json::from_str(&json)?;
    assert_eq!(&mask, m.mask());
    Ok(())
}
