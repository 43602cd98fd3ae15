use pretty_assertions::assert_eq;

use crate::errors::MalformedPartName;
use crate::part::FormatVersion;
use crate::part::PartId;

#[test]
fn test_parse_date_partitioned() -> anyhow::Result<()> {
    let p = PartId::parse("20210101_1_5_0", FormatVersion::DatePartitioned)?;
    assert_eq!(PartId {
        partition_id: "2021-01".to_string(),
        min_block: 1,
        max_block: 5,
        level: 0,
    }, p);

    // Parts of the same month share a partition.
    let p = PartId::parse("20210131_6_9_2", FormatVersion::DatePartitioned)?;
    assert_eq!("2021-01", p.partition_id);
    assert_eq!(9, p.max_block);

    Ok(())
}

#[test]
fn test_parse_custom_partitioned() -> anyhow::Result<()> {
    let p = PartId::parse("202103_2_2_0", FormatVersion::CustomPartitioned)?;
    assert_eq!(PartId {
        partition_id: "202103".to_string(),
        min_block: 2,
        max_block: 2,
        level: 0,
    }, p);

    // A custom partition id may itself contain underscores; the three
    // trailing components are split off from the right.
    let p = PartId::parse("us_east_7_19_3", FormatVersion::CustomPartitioned)?;
    assert_eq!("us_east", p.partition_id);
    assert_eq!(7, p.min_block);
    assert_eq!(19, p.max_block);
    assert_eq!(3, p.level);

    Ok(())
}

#[test]
fn test_grammar_is_selected_by_format_version_only() {
    // A perfectly good custom name is rejected under the date grammar.
    let res = PartId::parse("us_east_7_19_3", FormatVersion::DatePartitioned);
    assert!(res.is_err());

    // An 8-digit prefix is a valid custom partition id, taken verbatim.
    let p = PartId::parse("20210101_1_5_0", FormatVersion::CustomPartitioned)
        .unwrap();
    assert_eq!("20210101", p.partition_id);
}

#[test]
fn test_parse_rejects_malformed_names() {
    let cases = [
        ("", "empty input"),
        ("2021-01", "too few components"),
        ("1_2_3", "no partition prefix"),
        ("_1_2_3", "empty partition id"),
        ("p_one_2_3", "non-numeric min_block"),
        ("p_1_two_3", "non-numeric max_block"),
        ("p_1_2_minus", "non-numeric level"),
        ("p_1_2_-1", "negative level"),
        ("p_5_1_0", "min above max"),
        ("a b_1_2_0", "whitespace in partition id"),
    ];

    for (name, why) in cases {
        let res = PartId::parse(name, FormatVersion::CustomPartitioned);
        assert!(res.is_err(), "{}: {:?}", why, name);
    }
}

#[test]
fn test_parse_rejects_impossible_dates() {
    // Month 13 and day 32 are 8 digits but not calendar dates.
    for name in ["20211301_1_2_0", "20210132_1_2_0"] {
        let res = PartId::parse(name, FormatVersion::DatePartitioned);
        assert_eq!(
            Err(MalformedPartName::new(
                name,
                format!("date prefix {:?} is not a valid date", &name[..8]),
            )),
            res
        );
    }
}
