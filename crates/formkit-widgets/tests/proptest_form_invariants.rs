//! Property-based invariant tests for the form engine.
//!
//! 1. Return walks any chain order exactly once and submits exactly once.
//! 2. Return keys: `Go` on the chain's last field, `Next` on the others.
//! 3. Programmatic selection matches the equivalent user pick; indices and
//!    picker rows past the end are rejected without touching the selection.
//! 4. Picking the sentinel row of an optional field always unsets it.
//! 5. Reveal offsets stay inside `[0, content - visible + h/2]`.
//! 6. Unclamped reveal offsets center the field in the shrunk viewport.
//! 7. Scroll reset is idempotent.
//! 8. NotBlank accepts exactly the non-empty strings.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use formkit_core::{FieldId, Rect};
use formkit_widgets::{
    DropDown, Field, Form, OrderedChain, ReturnKey, ScrollCoordinator, TextInput, ValidationKind,
    Viewport, reveal_offset,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn chain_strategy() -> impl Strategy<Value = Vec<FieldId>> {
    (1u32..12).prop_flat_map(|n| Just((1..=n).map(FieldId).collect::<Vec<_>>()).prop_shuffle())
}

fn form_for(order: &[FieldId]) -> Form {
    let mut form = Form::new(Viewport::new(600.0, 2000.0));
    let mut ids = order.to_vec();
    ids.sort();
    for id in ids {
        let y = id.0 as f32 * 60.0;
        form.attach(TextInput::new(id).with_frame(Rect::new(0.0, y, 300.0, 40.0)));
    }
    form.set_chain_provider(OrderedChain::new(order.iter().copied()));
    form
}

fn choices_strategy() -> impl Strategy<Value = (Vec<String>, bool, usize)> {
    (prop::collection::vec("[A-Za-z]{1,8}", 1..8), any::<bool>())
        .prop_flat_map(|(choices, required)| {
            let len = choices.len();
            (Just(choices), Just(required), 0..len)
        })
}

fn loaded(choices: &[String], required: bool) -> DropDown {
    let mut drop_down = DropDown::new(FieldId(1));
    drop_down
        .reload_with(choices.to_vec(), required, None)
        .unwrap();
    drop_down
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Chain traversal
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn return_visits_each_field_once(order in chain_strategy()) {
        let mut form = form_for(&order);
        let submits = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&submits);
        form.set_submit_sink(move || counter.set(counter.get() + 1));

        let mut visited = Vec::new();
        form.begin_editing(order[0]).unwrap();
        while let Some(id) = form.focused() {
            prop_assert!(visited.len() < order.len(), "traversal did not terminate");
            visited.push(id);
            form.press_return(id).unwrap();
        }

        prop_assert_eq!(&visited, &order);
        prop_assert_eq!(submits.get(), 1);
        prop_assert!(!form.scroll().is_shrunk());
    }

    #[test]
    fn return_keys_mark_last_field(order in chain_strategy()) {
        let form = form_for(&order);
        let last = *order.last().unwrap();
        for id in &order {
            let key = form.field(*id).unwrap().as_field().return_key();
            let expected = if *id == last { ReturnKey::Go } else { ReturnKey::Next };
            prop_assert_eq!(key, expected, "field {}", id);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3–4. Selection offsets
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn select_at_matches_user_pick((choices, required, index) in choices_strategy()) {
        let mut by_program = loaded(&choices, required);
        let mut by_user = loaded(&choices, required);

        by_program.select_at(index).unwrap();
        let row = by_user.state().row_for(index);
        let value = by_user.picker_rows()[row].clone();
        by_user.on_choice_picked(row, &value).unwrap();

        prop_assert_eq!(by_program.state(), by_user.state());
        prop_assert_eq!(by_program.selected_index(), Some(index));
        prop_assert_eq!(by_program.text(), choices[index].as_str());
    }

    #[test]
    fn out_of_range_selection_is_rejected(
        (choices, required, index) in choices_strategy(),
        past_end in 0usize..5,
    ) {
        let mut drop_down = loaded(&choices, required);
        prop_assert!(drop_down.select_at(choices.len() + past_end).is_err());
        prop_assert!(drop_down.state().is_unset());

        drop_down.select_at(index).unwrap();
        let before = drop_down.state().clone();
        let rows = drop_down.picker_rows().len();
        prop_assert!(drop_down.on_choice_picked(rows + past_end, "ghost").is_err());
        prop_assert_eq!(drop_down.state(), &before);
        prop_assert_eq!(drop_down.selected_index(), Some(index));
    }

    #[test]
    fn sentinel_pick_unsets((choices, _required, index) in choices_strategy()) {
        let mut drop_down = loaded(&choices, false);
        drop_down.select_at(index).unwrap();
        drop_down.on_choice_picked(0, "-").unwrap();
        prop_assert!(drop_down.state().is_unset());
        prop_assert_eq!(drop_down.selected_index(), None);
        prop_assert_eq!(drop_down.text(), "");
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5–7. Scrolling
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reveal_offset_is_clamped(
        y in 0.0f32..3000.0,
        h in 1.0f32..120.0,
        height in 200.0f32..1000.0,
        overlay_share in 0.0f32..0.9,
        extra in 0.0f32..3000.0,
    ) {
        let overlay = height * overlay_share;
        let content = height + extra;
        let field = Rect::new(0.0, y, 300.0, h);
        let offset = reveal_offset(field, height, overlay, content);
        let upper = (content - (height - overlay) + h / 2.0).max(0.0);
        prop_assert!(offset >= 0.0);
        prop_assert!(offset <= upper + 1e-3, "offset {} above {}", offset, upper);
    }

    #[test]
    fn unclamped_reveal_centers_field(
        y in 400.0f32..800.0,
        h in 1.0f32..60.0,
        overlay in 0.0f32..300.0,
    ) {
        let height = 700.0;
        let content = 4000.0;
        let field = Rect::new(0.0, y, 300.0, h);
        let offset = reveal_offset(field, height, overlay, content);
        let visible = height - overlay;
        let field_center_on_screen = field.center_y() - offset;
        prop_assert!((field_center_on_screen - visible / 2.0).abs() < 1e-2);
    }

    #[test]
    fn reset_is_idempotent(
        frames in prop::collection::vec((0.0f32..2000.0, 1.0f32..80.0), 0..6),
        overlay in 0.0f32..400.0,
        ticks in 0usize..20,
    ) {
        let mut scroll = ScrollCoordinator::new(Viewport::new(700.0, 2500.0));
        scroll.on_overlay_shown(overlay);
        for (y, h) in frames {
            scroll.reveal(Rect::new(0.0, y, 300.0, h));
        }
        for _ in 0..ticks {
            scroll.tick(Duration::from_millis(16));
        }

        scroll.reset();
        let once = (*scroll.viewport(), scroll.state());
        scroll.reset();
        prop_assert_eq!((*scroll.viewport(), scroll.state()), once);
        prop_assert_eq!(scroll.viewport().bottom_inset, 0.0);
        prop_assert!(!scroll.tick(Duration::from_millis(16)));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Validation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn not_blank_accepts_non_empty(text in "\\PC*") {
        let verdict = ValidationKind::NotBlank.verdict(&text);
        prop_assert_eq!(verdict.is_valid(), !text.is_empty());
    }

    #[test]
    fn no_validation_accepts_anything(text in "\\PC*") {
        prop_assert!(ValidationKind::NoValidation.verdict(&text).is_valid());
    }
}
