//! Employee record extracted from the reconciled table.
//!
//! A record holds the raw text of every field the metric engine reads, plus
//! the full reconciled row so that the enriched output can carry all source
//! columns through.

use serde::Serialize;

use crate::error::EngineResult;

use super::columns;
use super::table::RawTable;

/// Column positions of the fields an [`EmployeeRecord`] reads.
///
/// Resolving once per table turns a missing column into a single
/// `MissingColumn` error instead of a silent null on every row.
#[derive(Debug, Clone)]
pub struct EmployeeColumns {
    position_id: usize,
    full_name: usize,
    personnel_number: usize,
    region: usize,
    org_unit_path: usize,
    function_code: usize,
    position_title: usize,
    grade: usize,
    mrf: usize,
    tariff_rate: usize,
    headcount_units: usize,
    monthly_bonus_pct: usize,
    quarterly_bonus_pct: usize,
    annual_bonus_pct: usize,
    last_raise_date: usize,
    hire_date: usize,
    market_pay: usize,
    opex_ratio: usize,
    capex_ratio: usize,
    o2o_ratio: usize,
    insurance_rate: usize,
    pay_components: Vec<usize>,
}

impl EmployeeColumns {
    /// Resolves every required column and the declared pay components.
    pub fn resolve(table: &RawTable, pay_components: &[String]) -> EngineResult<Self> {
        Ok(Self {
            position_id: table.require_column(columns::POSITION_ID)?,
            full_name: table.require_column(columns::FULL_NAME)?,
            personnel_number: table.require_column(columns::PERSONNEL_NUMBER)?,
            region: table.require_column(columns::REGION)?,
            org_unit_path: table.require_column(columns::ORG_UNIT_PATH)?,
            function_code: table.require_column(columns::FUNCTION_CODE)?,
            position_title: table.require_column(columns::POSITION_TITLE)?,
            grade: table.require_column(columns::GRADE)?,
            mrf: table.require_column(columns::MRF)?,
            tariff_rate: table.require_column(columns::TARIFF_RATE)?,
            headcount_units: table.require_column(columns::HEADCOUNT_UNITS)?,
            monthly_bonus_pct: table.require_column(columns::MONTHLY_BONUS_PCT)?,
            quarterly_bonus_pct: table.require_column(columns::QUARTERLY_BONUS_PCT)?,
            annual_bonus_pct: table.require_column(columns::ANNUAL_BONUS_PCT)?,
            last_raise_date: table.require_column(columns::LAST_RAISE_DATE)?,
            hire_date: table.require_column(columns::HIRE_DATE)?,
            market_pay: table.require_column(columns::MARKET_PAY)?,
            opex_ratio: table.require_column(columns::OPEX)?,
            capex_ratio: table.require_column(columns::CAPEX)?,
            o2o_ratio: table.require_column(columns::O2O)?,
            insurance_rate: table.require_column(columns::INSURANCE_RATE)?,
            pay_components: pay_components
                .iter()
                .map(|column| table.require_column(column))
                .collect::<EngineResult<Vec<_>>>()?,
        })
    }
}

/// One staffed position after reconciliation, fields still as source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmployeeRecord {
    /// Position-instance identifier.
    pub position_id: Option<String>,
    /// Employee full name.
    pub full_name: Option<String>,
    /// Personnel number.
    pub personnel_number: Option<String>,
    /// Region code.
    pub region: Option<String>,
    /// Org unit full path.
    pub org_unit_path: Option<String>,
    /// Function code.
    pub function_code: Option<String>,
    /// Position title.
    pub position_title: Option<String>,
    /// Grade.
    pub grade: Option<String>,
    /// Macro-region.
    pub mrf: Option<String>,
    /// Base tariff rate.
    pub tariff_rate: Option<String>,
    /// Pay components in declared order.
    pub pay_components: Vec<Option<String>>,
    /// Headcount units.
    pub headcount_units: Option<String>,
    /// Monthly bonus percent.
    pub monthly_bonus_pct: Option<String>,
    /// Quarterly bonus percent.
    pub quarterly_bonus_pct: Option<String>,
    /// Annual bonus percent.
    pub annual_bonus_pct: Option<String>,
    /// Last raise date (`YYYY-MM-DD`).
    pub last_raise_date: Option<String>,
    /// Hire date (day first).
    pub hire_date: Option<String>,
    /// Market benchmark compensation.
    pub market_pay: Option<String>,
    /// OPEX allocation ratio.
    pub opex_ratio: Option<String>,
    /// CAPEX allocation ratio.
    pub capex_ratio: Option<String>,
    /// O2O allocation ratio.
    pub o2o_ratio: Option<String>,
    /// Insurance contribution rate.
    pub insurance_rate: Option<String>,
    /// The whole reconciled row, aligned with the reconciled table headers.
    #[serde(skip)]
    pub cells: Vec<Option<String>>,
}

impl EmployeeRecord {
    /// Reads one reconciled row.
    pub fn from_row(table: &RawTable, row: usize, columns: &EmployeeColumns) -> Self {
        let get = |column: usize| table.cell(row, column).map(str::to_string);

        Self {
            position_id: get(columns.position_id),
            full_name: get(columns.full_name),
            personnel_number: get(columns.personnel_number),
            region: get(columns.region),
            org_unit_path: get(columns.org_unit_path),
            function_code: get(columns.function_code),
            position_title: get(columns.position_title),
            grade: get(columns.grade),
            mrf: get(columns.mrf),
            tariff_rate: get(columns.tariff_rate),
            pay_components: columns.pay_components.iter().map(|&c| get(c)).collect(),
            headcount_units: get(columns.headcount_units),
            monthly_bonus_pct: get(columns.monthly_bonus_pct),
            quarterly_bonus_pct: get(columns.quarterly_bonus_pct),
            annual_bonus_pct: get(columns.annual_bonus_pct),
            last_raise_date: get(columns.last_raise_date),
            hire_date: get(columns.hire_date),
            market_pay: get(columns.market_pay),
            opex_ratio: get(columns.opex_ratio),
            capex_ratio: get(columns.capex_ratio),
            o2o_ratio: get(columns.o2o_ratio),
            insurance_rate: get(columns.insurance_rate),
            cells: table.rows.get(row).cloned().unwrap_or_default(),
        }
    }

    /// Reads every row of a reconciled table.
    pub fn from_table(table: &RawTable, pay_components: &[String]) -> EngineResult<Vec<Self>> {
        let columns = EmployeeColumns::resolve(table, pay_components)?;
        Ok((0..table.len())
            .map(|row| Self::from_row(table, row, &columns))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::columns::*;

    fn headers() -> Vec<&'static str> {
        vec![
            POSITION_ID, FULL_NAME, PERSONNEL_NUMBER, REGION, ORG_UNIT_PATH, FUNCTION_CODE,
            POSITION_TITLE, GRADE, MRF, TARIFF_RATE, "Надбавка за стаж", HEADCOUNT_UNITS,
            MONTHLY_BONUS_PCT, QUARTERLY_BONUS_PCT, ANNUAL_BONUS_PCT, LAST_RAISE_DATE, HIRE_DATE,
            MARKET_PAY, OPEX, CAPEX, O2O, INSURANCE_RATE,
        ]
    }

    #[test]
    fn test_from_table_reads_named_fields() {
        let table = RawTable::from_strings(
            "employees",
            &headers(),
            &[&[
                "ШЕ-1", "Иванов И.И.", "1001", "77", "Москва/ИТ", "F01", "Инженер", "G10", "Центр",
                "100000", "5000", "1", "10", "", "", "2021-03-01", "01.02.2015", "150000", "0.6",
                "0.4", "", "0.302",
            ]],
        );

        let records = EmployeeRecord::from_table(&table, &["Надбавка за стаж".to_string()]).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.position_id.as_deref(), Some("ШЕ-1"));
        assert_eq!(record.personnel_number.as_deref(), Some("1001"));
        assert_eq!(record.mrf.as_deref(), Some("Центр"));
        assert_eq!(record.pay_components, vec![Some("5000".to_string())]);
        assert_eq!(record.quarterly_bonus_pct, None);
        assert_eq!(record.o2o_ratio, None);
        assert_eq!(record.cells.len(), headers().len());
    }

    #[test]
    fn test_undeclared_pay_component_is_missing_column() {
        let table = RawTable::from_strings("employees", &headers(), &[]);

        let result = EmployeeRecord::from_table(&table, &["Премия за вредность".to_string()]);

        match result {
            Err(EngineError::MissingColumn { table, column }) => {
                assert_eq!(table, "employees");
                assert_eq!(column, "Премия за вредность");
            }
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }
}
