//! Column names of the source tables and of the enriched output.
//!
//! The sources are exported from the HR system with Russian headers; the
//! names below must match them exactly.

/// Position-instance identifier; unique per staffed position.
pub const POSITION_ID: &str = "Имя штатной единицы";
/// Personnel (tab) number.
pub const PERSONNEL_NUMBER: &str = "Таб. №";
/// Employee full name.
pub const FULL_NAME: &str = "Ф.И.О.";
/// Assignment status.
pub const STATUS: &str = "Статус назначения";
/// Status value marking an open position.
pub const VACANCY_STATUS: &str = "Вакансия";
/// Headcount units held by the assignment.
pub const HEADCOUNT_UNITS: &str = "Кол-во единиц";
/// Date of the last raise.
pub const LAST_RAISE_DATE: &str = "Дата последнего повышения";
/// Base tariff rate.
pub const TARIFF_RATE: &str = "Тарифная ставка (оклад), руб.";
/// Hire date.
pub const HIRE_DATE: &str = "Дата приема";
/// Full path of the org unit.
pub const ORG_UNIT_PATH: &str = "Структурное подразделение - полный путь с группирующими";
/// Function code.
pub const FUNCTION_CODE: &str = "Код функции";
/// Position title.
pub const POSITION_TITLE: &str = "Должность /профессия (разряд, категория)";
/// Grade.
pub const GRADE: &str = "Грейд";
/// Region code.
pub const REGION: &str = "РФ";
/// Macro-region.
pub const MRF: &str = "МРФ";
/// Monthly bonus percent.
pub const MONTHLY_BONUS_PCT: &str = "Процент месячной премии";
/// Quarterly bonus percent.
pub const QUARTERLY_BONUS_PCT: &str = "Процент квартальной премии";
/// Annual bonus percent.
pub const ANNUAL_BONUS_PCT: &str = "Процент годовой премии";
/// OPEX allocation ratio.
pub const OPEX: &str = "OPEX";
/// CAPEX allocation ratio.
pub const CAPEX: &str = "CAPEX";
/// O2O allocation ratio.
pub const O2O: &str = "O2O";
/// Insurance contribution rate (the typo is part of the source header).
pub const INSURANCE_RATE: &str = "Процентр страховых взносов";
/// Market benchmark total compensation.
pub const MARKET_PAY: &str = "ФОТ по рынку";

/// Key joining the market benchmark table.
pub const MARKET_KEY: [&str; 4] = [ORG_UNIT_PATH, FUNCTION_CODE, POSITION_TITLE, GRADE];

/// Salary-table columns that are not pay components.
pub const SALARY_NON_COMPONENT_COLUMNS: [&str; 6] = [
    POSITION_ID,
    PERSONNEL_NUMBER,
    STATUS,
    HEADCOUNT_UNITS,
    LAST_RAISE_DATE,
    TARIFF_RATE,
];

/// Derived: bonus multiplier.
pub const BONUS_MULTIPLIER: &str = "Процент премирования";
/// Derived: sum of pay components.
pub const TOTAL_ALLOWANCES: &str = "Надбавки всего";
/// Derived: tariff plus allowances.
pub const BASE_PAY: &str = "База ФОТ";
/// Derived: total compensation.
pub const TOTAL_PAY: &str = "ФОТ";
/// Derived: total compensation split to OPEX.
pub const TOTAL_PAY_OPEX: &str = "ФОТ_OPEX";
/// Derived: total compensation split to CAPEX.
pub const TOTAL_PAY_CAPEX: &str = "ФОТ_CAPEX";
/// Derived: total compensation split to O2O.
pub const TOTAL_PAY_O2O: &str = "ФОТ_O2O";
/// Derived: total compensation with social contributions.
pub const TOTAL_PAY_WITH_CONTRIBUTIONS: &str = "ФОТ с СВ";
/// Derived: tenure in years.
pub const TENURE_YEARS: &str = "Стаж (лет)";
/// Derived: total pay over market pay.
pub const PAID_RATIO: &str = "Проплаченность";
/// Derived: raise eligibility flag.
pub const RAISE_RECOMMENDED: &str = "Рекомендуется повышение";
/// Derived: uncapped raise.
pub const DESIRED_RAISE: &str = "Сумма повышения";
/// Derived: total pay plus uncapped raise.
pub const PROJECTED_PAY_UNCAPPED: &str = "Новый ФОТ (до лимита)";
/// Derived: budget-constrained raise.
pub const ALLOCATED_RAISE: &str = "Повышение по лимиту";
/// Derived: total pay plus allocated raise.
pub const PROJECTED_PAY_CAPPED: &str = "Новый ФОТ (после лимита)";

/// Derived columns appended to the enriched employee output, in order.
pub const DERIVED_COLUMNS: [&str; 15] = [
    BONUS_MULTIPLIER,
    TOTAL_ALLOWANCES,
    BASE_PAY,
    TOTAL_PAY,
    TOTAL_PAY_OPEX,
    TOTAL_PAY_CAPEX,
    TOTAL_PAY_O2O,
    TOTAL_PAY_WITH_CONTRIBUTIONS,
    TENURE_YEARS,
    PAID_RATIO,
    RAISE_RECOMMENDED,
    DESIRED_RAISE,
    PROJECTED_PAY_UNCAPPED,
    ALLOCATED_RAISE,
    PROJECTED_PAY_CAPPED,
];
