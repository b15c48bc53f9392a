use yarn_blend::{aggregate, apportion, calculate, Aggregation, FiberShare, ValidationError, YarnEntry};

fn entry(grams: f64, shares: &[(&str, f64)]) -> YarnEntry {
    YarnEntry::new(
        grams,
        shares
            .iter()
            .map(|(name, pct)| FiberShare::new(*name, *pct))
            .collect(),
    )
}

fn tenths(entries: &[YarnEntry]) -> Vec<(String, i64)> {
    calculate(entries)
        .unwrap()
        .unwrap()
        .rows
        .into_iter()
        .map(|row| (row.name, row.tenths))
        .collect()
}

#[test]
fn sock_yarn_splits_three_to_one() {
    let entries = vec![entry(100.0, &[("wool", 75.0), ("nylon", 25.0)])];

    match aggregate(&entries).unwrap() {
        Aggregation::Weights { weights, total } => {
            assert_eq!(total, 100.0);
            assert_eq!(weights.get("Wool"), Some(75.0));
            assert_eq!(weights.get("Nylon"), Some(25.0));

            let rows = apportion(&weights, total);
            assert_eq!(rows[0].name, "Wool");
            assert_eq!(rows[0].tenths, 750);
            assert_eq!(rows[1].name, "Nylon");
            assert_eq!(rows[1].tenths, 250);
        }
        Aggregation::EmptyTotal => panic!("expected weights"),
    }
}

#[test]
fn near_thirds_need_no_correction() {
    let entries = vec![entry(100.0, &[("A", 33.3), ("B", 33.3), ("C", 33.4)])];
    assert_eq!(
        tenths(&entries),
        [
            ("C".to_string(), 334),
            ("A".to_string(), 333),
            ("B".to_string(), 333)
        ]
    );
}

#[test]
fn zero_gram_entry_is_validated_but_weightless() {
    let entries = vec![
        entry(300.0, &[("A", 33.0), ("B", 33.0), ("C", 34.0)]),
        entry(0.0, &[("A", 100.0)]),
    ];
    let report = calculate(&entries).unwrap().unwrap();
    assert_eq!(report.total_grams, 300.0);
    assert_eq!(
        report
            .rows
            .iter()
            .map(|row| row.tenths)
            .collect::<Vec<_>>(),
        [340, 330, 330]
    );

    let broken = vec![
        entry(300.0, &[("A", 33.0), ("B", 33.0), ("C", 34.0)]),
        entry(0.0, &[("A", 90.0)]),
    ];
    assert!(matches!(
        calculate(&broken),
        Err(ValidationError::PercentSumMismatch { entry: 1, .. })
    ));
}

#[test]
fn empty_batches_are_not_errors() {
    assert_eq!(aggregate(&[]), Ok(Aggregation::EmptyTotal));
    assert_eq!(calculate(&[]), Ok(None));

    let weightless = vec![entry(0.0, &[("Wool", 100.0)]), entry(0.0, &[("Silk", 100.0)])];
    assert_eq!(calculate(&weightless), Ok(None));
}

#[test]
fn any_share_sum_off_by_more_than_tolerance_is_rejected() {
    for offset in [-5.0, -0.1, 0.1, 2.5] {
        let entries = vec![
            entry(10.0, &[("Wool", 100.0)]),
            entry(10.0, &[("Wool", 50.0), ("Silk", 50.0 + offset)]),
        ];
        match aggregate(&entries) {
            Err(ValidationError::PercentSumMismatch { entry, actual }) => {
                assert_eq!(entry, 1);
                assert!((actual - (100.0 + offset)).abs() < 1e-9);
            }
            other => panic!("offset {offset}: unexpected {other:?}"),
        }
    }
}

#[test]
fn shares_always_total_one_hundred_percent() {
    let fibers = ["Wool", "Silk", "Nylon", "Alpaca", "Cotton", "Linen", "Yak"];
    for yarns in 1..=5usize {
        for seed in 0..20usize {
            let entries: Vec<YarnEntry> = (0..yarns)
                .map(|y| {
                    let count = 1 + (seed + y) % fibers.len();
                    let mut shares: Vec<FiberShare> = (0..count)
                        .map(|f| {
                            let raw = 1.0 + ((seed * 7 + y * 3 + f * 11) % 13) as f64;
                            FiberShare::new(fibers[(f + y) % fibers.len()], raw)
                        })
                        .collect();
                    let sum: f64 = shares.iter().map(|share| share.percentage).sum();
                    for share in &mut shares {
                        share.percentage = share.percentage / sum * 100.0;
                    }
                    let grams = 10.0 + ((seed * 17 + y * 5) % 90) as f64 * 1.37;
                    YarnEntry::new(grams, shares)
                })
                .collect();

            let report = calculate(&entries).unwrap().unwrap();
            let total: i64 = report.rows.iter().map(|row| row.tenths).sum();
            assert_eq!(total, 1000, "yarns={yarns} seed={seed}");
        }
    }
}

#[test]
fn already_exact_shares_come_back_unchanged() {
    let entries = vec![
        entry(200.0, &[("Wool", 50.0), ("Silk", 50.0)]),
        entry(200.0, &[("Wool", 20.0), ("Cotton", 80.0)]),
    ];
    // Wool 140g, Silk 100g, Cotton 160g of 400g.
    assert_eq!(
        tenths(&entries),
        [
            ("Cotton".to_string(), 400),
            ("Wool".to_string(), 350),
            ("Silk".to_string(), 250)
        ]
    );
}
