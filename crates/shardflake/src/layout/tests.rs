use crate::{BitLayout, Error, GeneratorOption, GeneratorOptions, IdParts};
use core::time::Duration;

fn options(sequence_bits: u8, shard_bits: u8, timestamp_unit: Duration) -> GeneratorOptions {
    GeneratorOptions {
        sequence_bits,
        shard_bits,
        timestamp_unit,
    }
}

const MS: Duration = Duration::from_millis(1);

#[test]
fn default_options_resolve() {
    let (layout, shard) = BitLayout::resolve(&GeneratorOptions::default(), 3).unwrap();
    assert_eq!(layout, BitLayout::default());
    assert_eq!(layout.sequence_bits(), 8);
    assert_eq!(layout.shard_bits(), 6);
    assert_eq!(layout.timestamp_unit(), MS);
    assert_eq!(layout.max_sequence(), 256);
    assert_eq!(layout.max_shard(), 63);
    assert_eq!(layout.timestamp_shift(), 14);
    assert_eq!(layout.timestamp_bits(), 49);
    assert_eq!(shard, 3);
}

#[test]
fn later_directives_win() {
    let options: GeneratorOptions = [
        GeneratorOption::ShardBits(2),
        GeneratorOption::SequenceBits(12),
        GeneratorOption::ShardBits(4),
    ]
    .into_iter()
    .collect();
    assert_eq!(options, self::options(12, 4, MS));

    let options = GeneratorOptions::default()
        .with(GeneratorOption::TimestampUnit(Duration::from_secs(1)))
        .with(GeneratorOption::TimestampUnit(Duration::from_micros(1)));
    assert_eq!(options.timestamp_unit, Duration::from_micros(1));
}

#[test]
fn rejects_sequence_bits_out_of_range() {
    for bits in [0, 17, 32, u8::MAX] {
        assert_eq!(
            BitLayout::resolve(&options(bits, 0, MS), 0),
            Err(Error::InvalidSequenceBits { bits })
        );
    }
    assert!(BitLayout::resolve(&options(1, 0, MS), 0).is_ok());
    assert!(BitLayout::resolve(&options(16, 0, MS), 0).is_ok());
}

#[test]
fn rejects_timestamp_unit_out_of_range() {
    for unit in [
        Duration::ZERO,
        Duration::from_nanos(999),
        Duration::from_secs(1) + Duration::from_nanos(1),
        Duration::from_secs(60),
    ] {
        assert_eq!(
            BitLayout::resolve(&options(8, 6, unit), 0),
            Err(Error::InvalidTimestampUnit { unit })
        );
    }
    assert!(BitLayout::resolve(&options(8, 6, Duration::from_micros(1)), 0).is_ok());
    assert!(BitLayout::resolve(&options(8, 6, Duration::from_secs(1)), 0).is_ok());
}

#[test]
fn rejects_shard_bits_out_of_range() {
    for bits in [9, 10, u8::MAX] {
        assert_eq!(
            BitLayout::resolve(&options(8, bits, MS), 0),
            Err(Error::InvalidShardBits { bits })
        );
    }
    assert!(BitLayout::resolve(&options(8, 0, MS), 0).is_ok());
    assert!(BitLayout::resolve(&options(8, 8, MS), 0).is_ok());
}

#[test]
fn rejects_negative_shard() {
    for shard in [-1, -64, i64::MIN] {
        assert_eq!(
            BitLayout::resolve(&GeneratorOptions::default(), shard),
            Err(Error::NegativeShard { shard })
        );
    }
}

#[test]
fn rejects_layouts_without_44_timestamp_bits() {
    assert_eq!(
        BitLayout::resolve(&options(12, 8, MS), 0),
        Err(Error::LayoutTooWide {
            shard_bits: 8,
            sequence_bits: 12
        })
    );
    assert_eq!(
        BitLayout::resolve(&options(16, 4, MS), 0),
        Err(Error::LayoutTooWide {
            shard_bits: 4,
            sequence_bits: 16
        })
    );
    let (layout, _) = BitLayout::resolve(&options(16, 3, MS), 0).unwrap();
    assert_eq!(layout.timestamp_bits(), 44);
}

#[test]
fn reports_first_violation_in_check_order() {
    // Every check fails here; the sequence width is reported.
    let all_bad = options(0, 9, Duration::ZERO);
    assert!(matches!(
        BitLayout::resolve(&all_bad, -1),
        Err(Error::InvalidSequenceBits { .. })
    ));

    let bad_unit_and_shard_bits = options(8, 9, Duration::ZERO);
    assert!(matches!(
        BitLayout::resolve(&bad_unit_and_shard_bits, -1),
        Err(Error::InvalidTimestampUnit { .. })
    ));

    let bad_shard_bits = options(8, 9, MS);
    assert!(matches!(
        BitLayout::resolve(&bad_shard_bits, -1),
        Err(Error::InvalidShardBits { .. })
    ));

    let too_wide = options(16, 8, MS);
    assert!(matches!(
        BitLayout::resolve(&too_wide, -1),
        Err(Error::NegativeShard { .. })
    ));
}

#[test]
fn accepted_layouts_always_reserve_44_timestamp_bits() {
    for sequence_bits in 0..=20u8 {
        for shard_bits in 0..=10u8 {
            let result = BitLayout::resolve(&options(sequence_bits, shard_bits, MS), 0);
            let in_range = (1..=16).contains(&sequence_bits) && shard_bits <= 8;
            let fits = shard_bits + sequence_bits < 20;

            match result {
                Ok((layout, _)) => {
                    assert!(in_range && fits);
                    assert!(layout.shard_bits() + layout.sequence_bits() < 20);
                    assert!(layout.timestamp_bits() >= 44);
                }
                Err(_) => assert!(!(in_range && fits)),
            }
        }
    }
}

#[test]
fn shard_wraps_into_field_width() {
    for shard_bits in 0..=8u8 {
        let opts = options(8, shard_bits, MS);
        for shard in [0i64, 1, 5, 63, 64, 255, 256, 1_000_003, i64::MAX] {
            let (_, normalized) = BitLayout::resolve(&opts, shard).unwrap();
            assert_eq!(normalized, (shard % (1i64 << shard_bits)) as u64);
        }
    }
}

#[test]
fn zero_shard_bits_always_normalizes_to_zero() {
    let (layout, shard) = BitLayout::resolve(&options(8, 0, MS), 42).unwrap();
    assert_eq!(shard, 0);
    assert_eq!(layout.max_shard(), 0);
    assert_eq!(layout.timestamp_shift(), 8);
}

#[test]
fn encode_places_fields_high_to_low() {
    let layout = BitLayout::default();
    let id = layout.encode(IdParts {
        timestamp: 10,
        shard: 3,
        sequence: 1,
    });
    assert_eq!(id >> 14, (10 << 6) | 3);
    assert_eq!(id & 0xFF, 1);
    assert_eq!(
        layout.decode(id),
        IdParts {
            timestamp: 10,
            shard: 3,
            sequence: 1
        }
    );
}

#[test]
fn encode_without_shard_field_adjoins_timestamp_and_sequence() {
    let (layout, _) = BitLayout::resolve(&options(4, 0, MS), 0).unwrap();
    let id = layout.encode(IdParts {
        timestamp: 7,
        shard: 99,
        sequence: 0b1010,
    });
    assert_eq!(id, (7 << 4) | 0b1010);
    assert_eq!(layout.decode(id).shard, 0);
}

#[test]
fn encode_masks_oversized_fields() {
    let layout = BitLayout::default();
    let id = layout.encode(IdParts {
        timestamp: u64::MAX,
        shard: 64 + 5,
        sequence: 256 + 7,
    });
    assert!(id >= 0);
    assert_eq!(
        layout.decode(id),
        IdParts {
            timestamp: layout.max_timestamp(),
            shard: 5,
            sequence: 7
        }
    );
}

#[test]
fn ticks_truncate_toward_zero() {
    let layout = BitLayout::default();
    assert_eq!(layout.ticks(Duration::ZERO), 0);
    assert_eq!(layout.ticks(Duration::from_micros(999)), 0);
    assert_eq!(layout.ticks(Duration::from_micros(10_999)), 10);

    let (coarse, _) = BitLayout::resolve(&options(8, 6, Duration::from_secs(1)), 0).unwrap();
    assert_eq!(coarse.ticks(Duration::from_millis(2_500)), 2);

    let (odd, _) = BitLayout::resolve(&options(8, 6, Duration::from_micros(3)), 0).unwrap();
    assert_eq!(odd.ticks(Duration::from_micros(10)), 3);
}

#[test]
fn lifetime_scales_with_timestamp_unit() {
    let default = BitLayout::default();
    // 2^49 - 1 milliseconds is roughly 17,800 years.
    let years = default.lifetime().as_secs() / (365 * 24 * 3600);
    assert!((17_000..19_000).contains(&years), "{years} years");

    let (micro, _) =
        BitLayout::resolve(&options(8, 6, Duration::from_micros(1)), 0).unwrap();
    assert_eq!(micro.lifetime().as_secs(), default.lifetime().as_secs() / 1000);
}

#[test]
fn try_from_options_validates_without_shard() {
    assert!(BitLayout::try_from(GeneratorOptions::default()).is_ok());
    assert_eq!(
        BitLayout::try_from(options(0, 6, MS)),
        Err(Error::InvalidSequenceBits { bits: 0 })
    );
}

#[cfg(feature = "serde")]
#[test]
fn options_deserialize_with_defaults() {
    let options: GeneratorOptions = serde_json::from_str(r#"{"sequence_bits":10}"#).unwrap();
    assert_eq!(options, self::options(10, 6, MS));

    let json = serde_json::to_string(&GeneratorOptions::default()).unwrap();
    let back: GeneratorOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(back, GeneratorOptions::default());
}

#[test]
fn duration_of_inverts_ticks() {
    let (layout, _) = BitLayout::resolve(&options(8, 6, Duration::from_micros(250)), 0).unwrap();
    assert_eq!(layout.duration_of(4), MS);
    assert_eq!(layout.duration_of(6), Duration::from_micros(1_500));
    assert_eq!(layout.ticks(layout.duration_of(123_456)), 123_456);
}
