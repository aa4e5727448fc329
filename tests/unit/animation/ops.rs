use super::*;

#[test]
fn stagger_is_non_decreasing_in_document_order() {
    let delays = stagger(Millis(0), Millis(100), 3);
    assert_eq!(delays, vec![Millis(0), Millis(100), Millis(200)]);
    assert!(stagger(Millis(0), Millis(100), 0).is_empty());
}

#[test]
fn stagger_timings_keep_duration_and_ease() {
    let t = stagger_timings(Timing::REVEAL.with_delay(Millis(50)), Millis(100), 2);
    assert_eq!(t[0].delay, Millis(50));
    assert_eq!(t[1].delay, Millis(150));
    assert!(t.iter().all(|t| t.duration == Timing::REVEAL.duration));
}
