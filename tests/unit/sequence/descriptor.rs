use super::*;

#[test]
fn template_requires_single_placeholder() {
    assert!(UrlTemplate::new("/images/{}.webp", 3).is_ok());
    assert!(UrlTemplate::new("/images/frame.webp", 3).is_err());
    assert!(UrlTemplate::new("/images/{}/{}.webp", 3).is_err());
}

#[test]
fn template_zero_pads_and_appends_query() {
    let t = UrlTemplate::new("/images/sequence/{}.webp", 5)
        .unwrap()
        .with_query("?v=hd-q80");
    assert_eq!(t.resolve(FrameId(1)), "/images/sequence/00001.webp?v=hd-q80");
    assert_eq!(t.resolve_path(FrameId(1)), "/images/sequence/00001.webp");

    let t = UrlTemplate::new("ezgif-frame-{}.webp", 3).unwrap();
    assert_eq!(t.resolve(FrameId(7)), "ezgif-frame-007.webp");
    assert_eq!(t.resolve(FrameId(1234)), "ezgif-frame-1234.webp");
}

#[test]
fn ranges_with_gaps_keep_display_order() {
    let t = UrlTemplate::new("{}.webp", 3).unwrap();
    let seq = SequenceDescriptor::from_ranges(
        &[
            IdRange::new(1, 110),
            IdRange::new(142, 149),
            IdRange::new(207, 240),
        ],
        t,
    )
    .unwrap();
    assert_eq!(seq.len(), 152);
    assert_eq!(seq.id(SlotIndex(0)), Some(FrameId(1)));
    assert_eq!(seq.id(SlotIndex(110)), Some(FrameId(142)));
    assert_eq!(seq.id(SlotIndex(118)), Some(FrameId(207)));
    assert_eq!(seq.last_slot(), SlotIndex(151));
    assert_eq!(seq.url(SlotIndex(151)).as_deref(), Some("240.webp"));
    assert_eq!(seq.id(SlotIndex(152)), None);
}

#[test]
fn unordered_or_empty_sequences_are_rejected() {
    let t = UrlTemplate::new("{}.png", 1).unwrap();
    assert!(SequenceDescriptor::new(vec![], t.clone()).is_err());
    assert!(SequenceDescriptor::new(vec![FrameId(2), FrameId(2)], t.clone()).is_err());
    assert!(SequenceDescriptor::new(vec![FrameId(3), FrameId(1)], t.clone()).is_err());
    assert!(
        SequenceDescriptor::from_ranges(&[IdRange::new(5, 10), IdRange::new(8, 12)], t.clone())
            .is_err()
    );
    assert!(SequenceDescriptor::from_ranges(&[IdRange::new(4, 2)], t.clone()).is_err());
    assert!(SequenceDescriptor::contiguous(1, 0, t).is_err());
}

#[test]
fn contiguous_sequence_counts_frames() {
    let t = UrlTemplate::new("{}.webp", 5).unwrap();
    let seq = SequenceDescriptor::contiguous(1, 192, t).unwrap();
    assert_eq!(seq.len(), 192);
    assert_eq!(seq.id(SlotIndex(191)), Some(FrameId(192)));
}
