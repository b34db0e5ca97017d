use super::{clean, validate};

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;
use tempfile::TempDir;

use crate::models::{PipelineError, SchemaProfile, Transaction, TransactionType};

const RAW_HEADER: &str =
    "step,type,amount,nameOrig,oldbalanceOrg,newbalanceOrig,nameDest,oldbalanceDest,newbalanceDest,isFraud,isFlaggedFraud";

fn write_raw_csv(dir: &TempDir, rows: &[&str]) -> Result<PathBuf> {
    let path = dir.path().join("raw.csv");
    let mut contents = String::from(RAW_HEADER);

    for row in rows {
        contents.push('\n');
        contents.push_str(row);
    }

    fs::write(&path, contents)?;

    Ok(path)
}

fn create_transaction(hour: i64, amount: &str, is_fraud: i64) -> Result<Transaction> {
    Ok(Transaction {
        hour,
        kind: TransactionType::Payment,
        amount: Decimal::from_str(amount)?,
        initiator_id: "C100".to_string(),
        initiator_old_balance: Decimal::from_str("500.00")?,
        initiator_new_balance: Decimal::from_str("250.00")?,
        target_id: "M200".to_string(),
        target_old_balance: Decimal::from_str("0.00")?,
        target_new_balance: Decimal::from_str("250.00")?,
        is_fraud
    })
}

#[test]
fn test_clean_produces_the_canonical_table() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_raw_csv(&dir, &[
        "1,PAYMENT,9839.64,C1231006815,170136.00,160296.36,M1979787155,0.00,0.00,0,0",
        "2,TRANSFER,181.00,C1305486145,181.00,0.00,C553264065,0.00,181.00,1,0",
    ])?;

    let rows = clean(&path, SchemaProfile::Historical, dir.path())?;

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].hour, 1);
    assert_eq!(rows[0].kind, TransactionType::Payment);
    assert_eq!(rows[0].amount, Decimal::from_str("9839.64")?);
    assert_eq!(rows[0].initiator_id, "C1231006815");
    assert_eq!(rows[1].is_fraud, 1);

    Ok(())
}

#[test]
fn test_clean_deduplicates_keeping_the_first_occurrence() -> Result<()> {
    let dir = TempDir::new()?;
    let row = "1,PAYMENT,100.00,C1,50.00,0.00,M1,0.00,100.00,0,0";
    let path = write_raw_csv(&dir, &[row, row, row])?;

    let rows = clean(&path, SchemaProfile::Historical, dir.path())?;

    assert_eq!(rows.len(), 1);

    Ok(())
}

#[test]
fn test_clean_rejects_missing_values() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_raw_csv(&dir, &[
        "1,PAYMENT,,C1,50.00,0.00,M1,0.00,100.00,0,0",
    ])?;

    let result = clean(&path, SchemaProfile::Historical, dir.path());

    assert!(matches!(result, Err(PipelineError::DataQuality { row: 1, field: "amount" })));

    Ok(())
}

#[test]
fn test_clean_strips_leading_noise_from_monetary_fields() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_raw_csv(&dir, &[
        "1,CASH_OUT,$2904.88,C1,2904.88,0.00,M1,0.00,2904.88,0,0",
    ])?;

    let rows = clean(&path, SchemaProfile::Historical, dir.path())?;

    assert_eq!(rows[0].amount, Decimal::from_str("2904.88")?);

    Ok(())
}

#[test]
fn test_clean_rejects_monetary_fields_without_numeric_content() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_raw_csv(&dir, &[
        "1,CASH_OUT,garbage,C1,2904.88,0.00,M1,0.00,2904.88,0,0",
    ])?;

    let result = clean(&path, SchemaProfile::Historical, dir.path());

    assert!(matches!(result, Err(PipelineError::Parse { field: "amount", .. })));

    Ok(())
}

#[test]
fn test_clean_rejects_unknown_transaction_types() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_raw_csv(&dir, &[
        "1,WIRE,100.00,C1,50.00,0.00,M1,0.00,100.00,0,0",
    ])?;

    let result = clean(&path, SchemaProfile::Historical, dir.path());

    assert!(matches!(result, Err(PipelineError::Parse { field: "type", .. })));

    Ok(())
}

#[test]
fn test_canonical_artifact_carries_the_profile_header() -> Result<()> {
    for (profile, expected) in [
        (SchemaProfile::Historical, "hour,type,amount,initiator_id,initiator_old_balance,initiator_new_balance,target_id,target_old_balance,target_new_balance,is_fraud"),
        (SchemaProfile::Ledger, "hour,type,amount,sender,sender_old_balance,sender_new_balance,recipient,recipient_old_balance,recipient_new_balance,is_fraud,exceeds_transaction_limit"),
    ] {
        let dir = TempDir::new()?;
        let path = write_raw_csv(&dir, &[
            "1,PAYMENT,100.00,C1,50.00,0.00,M1,0.00,100.00,0,0",
        ])?;

        clean(&path, profile, dir.path())?;

        let artifact = fs::read_to_string(dir.path().join("cleaned_transactions.csv"))?;
        let header = artifact.lines().next().unwrap_or_default();

        assert_eq!(header, expected);
    }

    Ok(())
}

#[test]
fn test_cleaning_is_idempotent_over_a_reverse_mapped_canonical_table() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_raw_csv(&dir, &[
        "1,PAYMENT,9839.64,C1231006815,170136.00,160296.36,M1979787155,0.00,0.00,0,0",
        "5,TRANSFER,181.00,C1305486145,181.00,0.00,C553264065,0.00,181.00,1,0",
        "7,CASH_IN,229133.94,C905080434,15325.00,244458.94,C476402209,5083.00,51513.44,0,0",
    ])?;

    let first_pass = clean(&path, SchemaProfile::Historical, dir.path())?;

    // Reverse-map the canonical rows back onto the raw header and clean again.
    let raw_rows: Vec<String> = first_pass
        .iter()
        .map(|row| {
            format!(
                "{},{},{},{},{},{},{},{},{},{},0",
                row.hour,
                row.kind,
                row.amount,
                row.initiator_id,
                row.initiator_old_balance,
                row.initiator_new_balance,
                row.target_id,
                row.target_old_balance,
                row.target_new_balance,
                row.is_fraud
            )
        })
        .collect();
    let raw_refs: Vec<&str> = raw_rows.iter().map(String::as_str).collect();

    let second_dir = TempDir::new()?;
    let second_path = write_raw_csv(&second_dir, &raw_refs)?;
    let second_pass = clean(&second_path, SchemaProfile::Historical, second_dir.path())?;

    assert_eq!(first_pass, second_pass);

    Ok(())
}

#[test]
fn test_validate_accepts_a_conforming_table() -> Result<()> {
    let rows = vec![
        create_transaction(1, "100.00", 0)?,
        create_transaction(2, "250.00", 1)?,
    ];

    let table = validate(rows, SchemaProfile::Historical)?;

    assert_eq!(table.len(), 2);
    assert_eq!(table.max_hour(), 2);

    Ok(())
}

#[test]
fn test_validate_rejects_a_negative_balance_naming_the_field() -> Result<()> {
    let mut row = create_transaction(1, "100.00", 0)?;
    row.initiator_old_balance = Decimal::from_str("-12.50")?;

    let result = validate(vec![row], SchemaProfile::Historical);

    let Err(PipelineError::SchemaValidation { violations }) = result else {
        panic!("expected a schema validation failure");
    };
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].field, "initiator_old_balance");

    Ok(())
}

#[test]
fn test_validate_cites_profile_specific_field_names() -> Result<()> {
    let mut row = create_transaction(1, "100.00", 0)?;
    row.target_new_balance = Decimal::from_str("-1.00")?;

    let result = validate(vec![row], SchemaProfile::Ledger);

    let Err(PipelineError::SchemaValidation { violations }) = result else {
        panic!("expected a schema validation failure");
    };
    assert_eq!(violations[0].field, "recipient_new_balance");

    Ok(())
}

#[test]
fn test_validate_collects_all_violations_before_failing() -> Result<()> {
    let mut first = create_transaction(0, "100.00", 0)?;
    first.amount = Decimal::from_str("-5.00")?;
    let second = create_transaction(2, "50.00", 7)?;

    let result = validate(vec![first, second], SchemaProfile::Historical);

    let Err(PipelineError::SchemaValidation { violations }) = result else {
        panic!("expected a schema validation failure");
    };
    let fields: Vec<&str> = violations.iter().map(|violation| violation.field).collect();

    assert_eq!(violations.len(), 3);
    assert!(fields.contains(&"hour"));
    assert!(fields.contains(&"amount"));
    assert!(fields.contains(&"is_fraud"));

    Ok(())
}

#[test]
fn test_validate_rejects_an_empty_table() {
    let result = validate(Vec::new(), SchemaProfile::Historical);

    assert!(matches!(result, Err(PipelineError::EmptyInput { .. })));
}
