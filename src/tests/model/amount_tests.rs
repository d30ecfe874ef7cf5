use super::*;

#[test]
fn parses_whole_fraction_and_smallest_unit() {
    assert_eq!("1".parse::<Lbc>().unwrap(), Lbc::from_dewies(100_000_000));
    assert_eq!("1.5".parse::<Lbc>().unwrap(), Lbc::from_dewies(150_000_000));
    assert_eq!("0.00000001".parse::<Lbc>().unwrap(), Lbc::MIN_UNIT);
    assert_eq!(".25".parse::<Lbc>().unwrap(), Lbc::from_dewies(25_000_000));
    assert_eq!(" 3. ".parse::<Lbc>().unwrap(), Lbc::from_whole(3));
}

#[test]
fn truncates_digits_past_the_eighth() {
    assert_eq!(
        "0.123456789".parse::<Lbc>().unwrap(),
        Lbc::from_dewies(12_345_678)
    );
    assert_eq!("0.000000009".parse::<Lbc>().unwrap(), Lbc::ZERO);
}

#[test]
fn parse_truncating_reports_dropped_digits() {
    assert_eq!(
        Lbc::parse_truncating("0.123456789").unwrap(),
        (Lbc::from_dewies(12_345_678), true)
    );
    assert_eq!(Lbc::parse_truncating("0.1234567800").unwrap().1, false);
    assert_eq!(Lbc::parse_truncating("7").unwrap(), ("7".parse().unwrap(), false));
    assert!(Lbc::parse_truncating("x.1").is_err());
}

#[test]
fn rejects_garbage() {
    assert_eq!("".parse::<Lbc>(), Err(AmountError::Empty));
    assert!("abc".parse::<Lbc>().is_err());
    assert!("1.2.3".parse::<Lbc>().is_err());
    assert!("-".parse::<Lbc>().is_err());
    assert!("1e5".parse::<Lbc>().is_err());
}

#[test]
fn negative_amounts_parse_and_display() {
    let v: Lbc = "-2.5".parse().unwrap();
    assert!(v.is_negative());
    assert_eq!(v.to_string(), "-2.50000000");
}

#[test]
fn display_uses_eight_decimals() {
    assert_eq!(Lbc::from_whole(12).to_string(), "12.00000000");
    assert_eq!(Lbc::MIN_UNIT.to_string(), "0.00000001");
    assert_eq!(Lbc::ZERO.to_string(), "0.00000000");
}

#[test]
fn saturating_excess_never_goes_negative() {
    let ten = Lbc::from_whole(10);
    let twelve = Lbc::from_whole(12);
    assert_eq!(twelve.saturating_excess(ten), Lbc::from_whole(2));
    assert_eq!(ten.saturating_excess(twelve), Lbc::ZERO);
}

#[test]
fn deserializes_strings_and_numbers() {
    let v: Vec<Lbc> = serde_json::from_str(r#"["0.1", 2, 0.5]"#).unwrap();
    assert_eq!(
        v,
        vec![
            Lbc::from_dewies(10_000_000),
            Lbc::from_whole(2),
            Lbc::from_dewies(50_000_000)
        ]
    );
    assert_eq!(
        serde_json::to_string(&Lbc::from_whole(1)).unwrap(),
        "\"1.00000000\""
    );
}

#[test]
fn whole_truncates_toward_zero() {
    assert_eq!("3.99".parse::<Lbc>().unwrap().whole(), 3);
    assert_eq!("-3.99".parse::<Lbc>().unwrap().whole(), -3);
}
