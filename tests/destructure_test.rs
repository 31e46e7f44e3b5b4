use stow::{if_occupied, if_occupied_mut, PackedSlot, PaddedSlot, Slot};

#[test]
fn present_runs_primary_and_skips_companion() {
    let slot = Slot::occupied(123);
    let mut received = 0;

    if_occupied!(slot, value => {
        received = value;
    } else {
        panic!("companion arm ran for an occupied slot");
    });

    assert_eq!(received, 123);
}

#[test]
fn absent_does_nothing_without_companion() {
    let slot: Slot<i32> = Slot::vacant();

    if_occupied!(slot, value => {
        let _ = value;
        panic!("primary arm ran for a vacant slot");
    });
}

#[test]
fn absent_runs_companion_exactly_once() {
    let slot: Slot<i32> = Slot::vacant();
    let mut companion_runs = 0;

    if_occupied!(slot, value => {
        let _ = value;
        panic!("primary arm ran for a vacant slot");
    } else {
        companion_runs += 1;
    });

    assert_eq!(companion_runs, 1);
}

#[test]
fn companion_early_return_escapes_the_caller() {
    fn classify(slot: Slot<u32>) -> &'static str {
        if_occupied!(slot, value => {
            let _ = value;
        } else {
            return "vacant";
        });

        "occupied"
    }

    assert_eq!(classify(Slot::vacant()), "vacant");
    assert_eq!(classify(Slot::occupied(1)), "occupied");
}

#[test]
fn companion_break_escapes_the_enclosing_loop() {
    let slots = [Slot::occupied(1), Slot::occupied(2), Slot::vacant(), Slot::occupied(4)];
    let mut sum = 0;

    for slot in slots {
        if_occupied!(slot, value => {
            sum += value;
        } else {
            break;
        });
    }

    assert_eq!(sum, 3);
}

#[test]
fn mut_binding_mutates_the_payload_in_place() {
    let mut slot = Slot::occupied(10);

    if_occupied_mut!(slot, value => {
        *value *= 3;
    });

    assert_eq!(slot.to_option(), Some(30));
}

#[test]
fn mut_form_runs_companion_when_vacant() {
    let mut slot: Slot<u8> = Slot::vacant();
    let mut companion_runs = 0;

    if_occupied_mut!(slot, value => {
        *value = 1;
    } else {
        companion_runs += 1;
    });

    assert!(slot.is_vacant());
    assert_eq!(companion_runs, 1);
}

#[test]
fn works_across_layouts() {
    let padded = PaddedSlot::occupied(7u64);
    let mut padded_received = 0;
    if_occupied!(padded, value => {
        padded_received = value;
    });
    assert_eq!(padded_received, 7);

    // The packed layout is by-value only, so only the copying form applies.
    let packed = PackedSlot::occupied(9u16);
    let mut packed_received = 0;
    if_occupied!(packed, value => {
        packed_received = value;
    });
    assert_eq!(packed_received, 9);

    let mut padded_mut = PaddedSlot::occupied(1u32);
    if_occupied_mut!(padded_mut, value => {
        *value += 1;
    });
    assert_eq!(padded_mut.to_option(), Some(2));
}

#[test]
fn bound_value_is_a_copy_not_an_alias() {
    let mut slot = Slot::occupied(5);

    if_occupied!(slot, value => {
        // Rebinding the copy leaves the slot untouched.
        let value = value + 10;
        assert_eq!(value, 15);
    });

    slot.fill(6);
    assert_eq!(slot.to_option(), Some(6));
}
