// ==========================================
// ERS 文件校验系统 - 表格模板注册表
// ==========================================
// 职责: 表名 → SheetInfo 的静态只读映射
// 红线: 模板以数据形式登记，不写条件分支；新增模板无需改动管道逻辑
// ==========================================

use crate::domain::{SchemeFamily, SheetInfo};
use std::collections::HashMap;
use std::sync::OnceLock;

/// 所有模板的表头均位于第 9 行，数据从第 10 行开始
const HEADER_ROW: usize = 9;

// ==========================================
// 模板表
// ==========================================
static SHEETS: &[SheetInfo] = &[
    // ===== CSOP =====
    SheetInfo {
        scheme_family: SchemeFamily::Csop,
        header_row_count: HEADER_ROW,
        sheet_name: "CSOP_OptionsGranted_V4",
        sheet_title: "Options granted",
        rule_set_id: "ers-csop-options-granted",
        headers: &[
            "1. Date of grant (yyyy-mm-dd)",
            "2. Employee first name",
            "3. Employee second name (if applicable)",
            "4. Employee last name",
            "5. National Insurance number (if applicable)",
            "6. PAYE reference of employing company",
            "7. Number of shares over which options granted (e.g. 100.00)",
            "8. Unrestricted market value of a share at date of grant £ (e.g. 10.1234)",
            "9. Exercise price per share £ (e.g. 10.1234)",
        ],
    },
    SheetInfo {
        scheme_family: SchemeFamily::Csop,
        header_row_count: HEADER_ROW,
        sheet_name: "CSOP_OptionsRCL_V4",
        sheet_title: "Options released, lapsed or cancelled",
        rule_set_id: "ers-csop-options-rcl",
        headers: &[
            "1. Date of event (yyyy-mm-dd)",
            "2. Was money or value received by the option holder when the option was released, exchanged, cancelled or lapsed? (yes/no)",
            "3. If yes, amount of money or value received £ (e.g. 10.1234)",
            "4. Employee first name",
            "5. Employee second name (if applicable)",
            "6. Employee last name",
            "7. National Insurance number (if applicable)",
            "8. PAYE reference of employing company",
            "9. Was PAYE operated? (yes/no)",
        ],
    },
    SheetInfo {
        scheme_family: SchemeFamily::Csop,
        header_row_count: HEADER_ROW,
        sheet_name: "CSOP_OptionsExercised_V4",
        sheet_title: "Options exercised",
        rule_set_id: "ers-csop-options-exercised",
        headers: &[
            "1. Date of exercise (yyyy-mm-dd)",
            "2. Employee first name",
            "3. Employee second name (if applicable)",
            "4. Employee last name",
            "5. National Insurance number (if applicable)",
            "6. PAYE reference of employing company",
            "7. Date of grant (yyyy-mm-dd)",
            "8. Number of shares acquired (e.g. 100.00)",
            "9. Are the shares listed on a recognised stock exchange? (yes/no)",
            "10. If no, was the market value agreed with HMRC? (yes/no)",
            "11. If yes, enter the HMRC reference given",
            "12. Exercise price per share £ (e.g. 10.1234)",
            "13. Actual market value of a share at date of exercise £ (e.g. 10.1234)",
            "14. Unrestricted market value of a share at date of exercise £ (e.g. 10.1234)",
            "15. Unrestricted market value of a share at date of grant £ (e.g. 10.1234)",
            "16. Are the shares subject to restriction? (yes/no)",
            "17. Total amount paid for the shares £ (e.g. 10.1234)",
            "18. Was the option exercised within 3 years of grant? (yes/no)",
            "19. Was PAYE operated? (yes/no)",
            "20. If no, was a deduction made for the amount subject to tax? (yes/no)",
        ],
    },
    // ===== EMI =====
    SheetInfo {
        scheme_family: SchemeFamily::Emi,
        header_row_count: HEADER_ROW,
        sheet_name: "EMI40_Adjustments_V4",
        sheet_title: "Adjustment of options",
        rule_set_id: "ers-emi-adjustments",
        headers: &[
            "1. Has there been any adjustment of options following a variation in the share capital of which notice has been given to HMRC? (yes/no)",
            "2. Has there been a change to the description of the shares under option? (yes/no)",
            "3. Is the adjustment a disqualifying event? (yes/no)",
            "4. If yes, enter a number from 1 to 8 depending on the nature of the disqualifying event",
            "5. Date of adjustment (yyyy-mm-dd)",
            "6. Employee first name",
            "7. Employee second name (if applicable)",
            "8. Employee last name",
            "9. National Insurance number (if applicable)",
            "10. PAYE reference of employing company",
            "11. Exercise price per share under the option before the adjustment £ (e.g. 10.1234)",
            "12. Number of shares under the option after the adjustment (e.g. 100.00)",
            "13. Exercise price per share under the option after the adjustment £ (e.g. 10.1234)",
            "14. Actual market value of a share at date of grant £ (e.g. 10.1234)",
        ],
    },
    SheetInfo {
        scheme_family: SchemeFamily::Emi,
        header_row_count: HEADER_ROW,
        sheet_name: "EMI40_Replaced_V4",
        sheet_title: "Replacement of options",
        rule_set_id: "ers-emi-replaced",
        headers: &[
            "1. Date of grant of old option (yyyy-mm-dd)",
            "2. Date of grant of new option (yyyy-mm-dd)",
            "3. Employee first name",
            "4. Employee second name (if applicable)",
            "5. Employee last name",
            "6. National Insurance number (if applicable)",
            "7. PAYE reference of employing company",
            "8. Name of the acquiring company",
            "9. Number of shares under the old option (e.g. 100.00)",
            "10. Number of shares under the new option (e.g. 100.00)",
            "11. Unrestricted market value of a share under the old option at date of replacement £ (e.g. 10.1234)",
            "12. Unrestricted market value of a share under the new option at date of replacement £ (e.g. 10.1234)",
            "13. Exercise price per share under the old option £ (e.g. 10.1234)",
            "14. Exercise price per share under the new option £ (e.g. 10.1234)",
            "15. Actual market value of a share at date of replacement £ (e.g. 10.1234)",
            "16. Total amount paid for the new option £ (e.g. 10.1234)",
            "17. Was the replacement a result of a company reorganisation? (yes/no)",
        ],
    },
    SheetInfo {
        scheme_family: SchemeFamily::Emi,
        header_row_count: HEADER_ROW,
        sheet_name: "EMI40_RLC_V4",
        sheet_title: "Options released, lapsed or cancelled",
        rule_set_id: "ers-emi-rlc",
        headers: &[
            "1. Date of event (yyyy-mm-dd)",
            "2. Is the event a disqualifying event? (yes/no)",
            "3. If yes, enter a number from 1 to 8 depending on the nature of the disqualifying event",
            "4. Employee first name",
            "5. Employee second name (if applicable)",
            "6. Employee last name",
            "7. National Insurance number (if applicable)",
            "8. PAYE reference of employing company",
            "9. Number of shares which the options released, lapsed or cancelled were over (e.g. 100.00)",
            "10. Was money or value received by the option holder? (yes/no)",
            "11. If yes, amount of money or value received £ (e.g. 10.1234)",
            "12. Was PAYE operated? (yes/no)",
        ],
    },
    SheetInfo {
        scheme_family: SchemeFamily::Emi,
        header_row_count: HEADER_ROW,
        sheet_name: "EMI40_NonTaxable_V4",
        sheet_title: "Non-taxable exercise of options",
        rule_set_id: "ers-emi-non-taxable",
        headers: &[
            "1. Date of exercise (yyyy-mm-dd)",
            "2. Employee first name",
            "3. Employee second name (if applicable)",
            "4. Employee last name",
            "5. National Insurance number (if applicable)",
            "6. PAYE reference of employing company",
            "7. Number of shares acquired (e.g. 100.00)",
            "8. Exercise price per share £ (e.g. 10.1234)",
            "9. Actual market value of a share at date of grant £ (e.g. 10.1234)",
            "10. Actual market value of a share at date of exercise £ (e.g. 10.1234)",
            "11. Unrestricted market value of a share at date of exercise £ (e.g. 10.1234)",
            "12. Total amount paid for the shares £ (e.g. 10.1234)",
            "13. Are the shares listed on a recognised stock exchange? (yes/no)",
            "14. If no, was the market value agreed with HMRC? (yes/no)",
            "15. If yes, enter the HMRC reference given",
        ],
    },
    SheetInfo {
        scheme_family: SchemeFamily::Emi,
        header_row_count: HEADER_ROW,
        sheet_name: "EMI40_Taxable_V4",
        sheet_title: "Taxable exercise of options",
        rule_set_id: "ers-emi-taxable",
        headers: &[
            "1. Date of exercise (yyyy-mm-dd)",
            "2. Is the exercise the result of a disqualifying event? (yes/no)",
            "3. If yes, enter a number from 1 to 8 depending on the nature of the disqualifying event",
            "4. Employee first name",
            "5. Employee second name (if applicable)",
            "6. Employee last name",
            "7. National Insurance number (if applicable)",
            "8. PAYE reference of employing company",
            "9. Number of shares acquired (e.g. 100.00)",
            "10. Actual market value of a share at date of grant £ (e.g. 10.1234)",
            "11. Exercise price per share £ (e.g. 10.1234)",
            "12. Unrestricted market value of a share at date of grant £ (e.g. 10.1234)",
            "13. Actual market value of a share at date of exercise £ (e.g. 10.1234)",
            "14. Unrestricted market value of a share at date of exercise £ (e.g. 10.1234)",
            "15. Total amount paid for the shares £ (e.g. 10.1234)",
            "16. Are the shares listed on a recognised stock exchange? (yes/no)",
            "17. If no, was the market value agreed with HMRC? (yes/no)",
            "18. If yes, enter the HMRC reference given",
            "19. Has an election been made under section 431 ITEPA 2003? (yes/no)",
            "20. Was PAYE operated? (yes/no)",
        ],
    },
    // ===== SIP =====
    SheetInfo {
        scheme_family: SchemeFamily::Sip,
        header_row_count: HEADER_ROW,
        sheet_name: "SIP_Awards_V4",
        sheet_title: "Shares awarded",
        rule_set_id: "ers-sip-awards",
        headers: &[
            "1. Date of award (yyyy-mm-dd)",
            "2. Number of employees who acquired or were awarded shares",
            "3. Type of shares awarded, enter 1 for free, 2 for matching, 3 for partnership or 4 for dividend",
            "4. If free shares, are performance conditions attached to their award? (yes/no)",
            "5. If matching shares, what is the ratio of shares to partnership shares? (e.g. 2:1)",
            "6. Unrestricted market value per share on acquisition or award £ (e.g. 10.1234)",
            "7. Are the shares listed on a recognised stock exchange? (yes/no)",
            "8. If no, was the market value agreed with HMRC? (yes/no)",
            "9. If yes, enter the HMRC reference given",
            "10. Total number of shares acquired or awarded (e.g. 100.00)",
            "11. Total value of shares acquired or awarded £ (e.g. 10.1234)",
            "12. Number of employees who received the maximum award of free shares",
            "13. Number of employees who received the maximum award of partnership shares",
            "14. Total value of free shares awarded £ (e.g. 10.1234)",
            "15. Total value of matching shares awarded £ (e.g. 10.1234)",
            "16. Total value of partnership shares acquired £ (e.g. 10.1234)",
            "17. Total value of dividend shares acquired £ (e.g. 10.1234)",
        ],
    },
    SheetInfo {
        scheme_family: SchemeFamily::Sip,
        header_row_count: HEADER_ROW,
        sheet_name: "SIP_Out_V4",
        sheet_title: "Shares ceasing to be subject to the plan",
        rule_set_id: "ers-sip-out",
        headers: &[
            "1. Date shares ceased to be subject to the plan (yyyy-mm-dd)",
            "2. Employee first name",
            "3. Employee second name (if applicable)",
            "4. Employee last name",
            "5. National Insurance number (if applicable)",
            "6. PAYE reference of employing company",
            "7. Number of free shares ceasing to be subject to the plan (e.g. 100.00)",
            "8. Number of matching shares ceasing to be subject to the plan (e.g. 100.00)",
            "9. Number of partnership shares ceasing to be subject to the plan (e.g. 100.00)",
            "10. Number of dividend shares ceasing to be subject to the plan (e.g. 100.00)",
            "11. Unrestricted market value per share at date shares ceased to be subject to the plan £ (e.g. 10.1234)",
            "12. Have the shares been held in the plan for 5 years or more? (yes/no)",
            "13. If no, have the shares been held in the plan for 3 years or more? (yes/no)",
            "14. If no, do any of the exceptions apply? (yes/no)",
            "15. Was PAYE operated? (yes/no)",
            "16. Was the event a qualifying reason for leaving? (yes/no)",
        ],
    },
    // ===== OTHER =====
    SheetInfo {
        scheme_family: SchemeFamily::Other,
        header_row_count: HEADER_ROW,
        sheet_name: "Other_Grants_V4",
        sheet_title: "Grants of options",
        rule_set_id: "ers-other-grants",
        headers: &[
            "1. Date of grant (yyyy-mm-dd)",
            "2. Number of employees granted options",
            "3. Unrestricted market value per share at date of grant £ (e.g. 10.1234)",
            "4. Number of shares over which options granted (e.g. 100.00)",
        ],
    },
    SheetInfo {
        scheme_family: SchemeFamily::Other,
        header_row_count: HEADER_ROW,
        sheet_name: "Other_Options_V4",
        sheet_title: "Options exercised, released, cancelled or lapsed",
        rule_set_id: "ers-other-options",
        headers: &[
            "1. Date of event (yyyy-mm-dd)",
            "2. Is the event in relation to a disclosable tax avoidance scheme? (yes/no)",
            "3. If yes, enter the eight-digit scheme reference number (SRN)",
            "4. Employee first name",
            "5. Employee second name (if applicable)",
            "6. Employee last name",
            "7. National Insurance number (if applicable)",
            "8. PAYE reference of employing company",
            "9. Date of grant of the option subject to the reportable event (yyyy-mm-dd)",
            "10. Grantor company name",
            "11. Grantor company address line 1",
            "12. Grantor company address line 2",
            "13. Grantor company address line 3",
            "14. Grantor company address line 4",
            "15. Grantor company country",
            "16. Grantor company postcode",
            "17. Grantor company registration number (CRN)",
            "18. Grantor company Corporation Tax reference",
            "19. Grantor company PAYE reference",
            "20. Name of the company whose securities are under option",
            "21. Company address line 1",
            "22. Company address line 2",
            "23. Company address line 3",
            "24. Company address line 4",
            "25. Company country",
            "26. Company postcode",
            "27. Company registration number (CRN)",
            "28. Company Corporation Tax reference",
            "29. Company PAYE reference",
            "30. Were the options exercised? (yes/no)",
            "31. Total number of securities employee entitled to on exercise of the option before any cashless exercise (e.g. 100.00)",
            "32. If consideration was given for the securities, the amount given per security £ (e.g. 10.1234)",
            "33. If securities were acquired, market value per security at date of exercise £ (e.g. 10.1234)",
            "34. Is the company listed on a recognised stock exchange? (yes/no)",
            "35. If no, was the market value agreed with HMRC? (yes/no)",
            "36. If yes, enter the HMRC reference given",
            "37. If the shares were not acquired, total amount received for the option £ (e.g. 10.1234)",
            "38. If the options were cancelled or released, total amount of consideration £ (e.g. 10.1234)",
            "39. Total number of securities sold under a cashless exercise (e.g. 100.00)",
            "40. Amount of consideration received per security in the cashless exercise £ (e.g. 10.1234)",
            "41. Was PAYE operated? (yes/no)",
            "42. If no, has an adjustment been made for the amount subject to tax? (yes/no)",
        ],
    },
    SheetInfo {
        scheme_family: SchemeFamily::Other,
        header_row_count: HEADER_ROW,
        sheet_name: "Other_Acquisition_V4",
        sheet_title: "Acquisition of securities",
        rule_set_id: "ers-other-acquisition",
        headers: &[
            "1. Date of event (yyyy-mm-dd)",
            "2. Is the event in relation to a disclosable tax avoidance scheme? (yes/no)",
            "3. If yes, enter the eight-digit scheme reference number (SRN)",
            "4. Employee first name",
            "5. Employee second name (if applicable)",
            "6. Employee last name",
            "7. National Insurance number (if applicable)",
            "8. PAYE reference of employing company",
            "9. Name of the company whose securities were acquired",
            "10. Company address line 1",
            "11. Company address line 2",
            "12. Company address line 3",
            "13. Company address line 4",
            "14. Company country",
            "15. Company postcode",
            "16. Company registration number (CRN)",
            "17. Company Corporation Tax reference",
            "18. Company PAYE reference",
            "19. Description of security, enter a number from 1 to 9",
            "20. Are the securities partly paid? (yes/no)",
            "21. Are the securities restricted? (yes/no)",
            "22. If restricted, nature of restriction, enter a number from 1 to 3",
            "23. Length of time of restriction in years (e.g. 2.5)",
            "24. Number of securities acquired (e.g. 100.00)",
            "25. Are the securities listed on a recognised stock exchange? (yes/no)",
            "26. If no, was the market value agreed with HMRC? (yes/no)",
            "27. If yes, enter the HMRC reference given",
            "28. Actual market value per security at date of acquisition £ (e.g. 10.1234)",
            "29. Unrestricted market value per security at date of acquisition £ (e.g. 10.1234)",
            "30. Has an election been operated to disregard restrictions? (yes/no)",
            "31. Are the securities convertible? (yes/no)",
            "32. Market value per security ignoring conversion rights £ (e.g. 10.1234)",
            "33. Total price paid per security £ (e.g. 10.1234)",
            "34. Was there an artificial reduction in value on acquisition? (yes/no)",
            "35. If yes, enter a number from 1 to 3 for the type of reduction",
            "36. Were the securities acquired under an employee shareholder arrangement? (yes/no)",
            "37. If yes, did the employee shareholder shares exceed £2,000? (yes/no)",
            "38. Was PAYE operated? (yes/no)",
            "39. If no, was a deduction made for the amount subject to tax? (yes/no)",
            "40. Amount subject to PAYE £ (e.g. 10.1234)",
        ],
    },
    SheetInfo {
        scheme_family: SchemeFamily::Other,
        header_row_count: HEADER_ROW,
        sheet_name: "Other_RestrictedSecurities_V4",
        sheet_title: "Restricted securities",
        rule_set_id: "ers-other-restricted-securities",
        headers: &[
            "1. Date securities originally acquired (yyyy-mm-dd)",
            "2. Number of securities originally acquired (e.g. 100.00)",
            "3. Employee first name",
            "4. Employee second name (if applicable)",
            "5. Employee last name",
            "6. National Insurance number (if applicable)",
            "7. PAYE reference of employing company",
            "8. Date of chargeable event (yyyy-mm-dd)",
            "9. Nature of the event, enter a number from 1 to 3",
            "10. Actual market value per security at date of acquisition £ (e.g. 10.1234)",
            "11. Unrestricted market value per security at date of acquisition £ (e.g. 10.1234)",
            "12. Has an election been made under section 430 ITEPA 2003? (yes/no)",
            "13. Unrestricted market value per security at date of the chargeable event £ (e.g. 10.1234)",
            "14. Total amount paid per security £ (e.g. 10.1234)",
            "15. Is the company listed on a recognised stock exchange? (yes/no)",
            "16. If no, was the market value agreed with HMRC? (yes/no)",
            "17. If yes, enter the HMRC reference given",
            "18. Is the event in relation to a disclosable tax avoidance scheme? (yes/no)",
            "19. If yes, enter the eight-digit scheme reference number (SRN)",
            "20. Was PAYE operated? (yes/no)",
        ],
    },
    SheetInfo {
        scheme_family: SchemeFamily::Other,
        header_row_count: HEADER_ROW,
        sheet_name: "Other_OtherBenefits_V4",
        sheet_title: "Other benefits",
        rule_set_id: "ers-other-other-benefits",
        headers: &[
            "1. Date of first receipt of the benefit (yyyy-mm-dd)",
            "2. Is the event in relation to a disclosable tax avoidance scheme? (yes/no)",
            "3. If yes, enter the eight-digit scheme reference number (SRN)",
            "4. Employee first name",
            "5. Employee second name (if applicable)",
            "6. Employee last name",
            "7. National Insurance number (if applicable)",
            "8. PAYE reference of employing company",
            "9. Date securities originally acquired (yyyy-mm-dd)",
            "10. Number of securities originally acquired (e.g. 100.00)",
            "11. Amount or market value of the benefit received £ (e.g. 10.1234)",
            "12. Was PAYE operated? (yes/no)",
        ],
    },
    SheetInfo {
        scheme_family: SchemeFamily::Other,
        header_row_count: HEADER_ROW,
        sheet_name: "Other_Convertible_V4",
        sheet_title: "Convertible securities",
        rule_set_id: "ers-other-convertible",
        headers: &[
            "1. Date of event (yyyy-mm-dd)",
            "2. Is the event in relation to a disclosable tax avoidance scheme? (yes/no)",
            "3. If yes, enter the eight-digit scheme reference number (SRN)",
            "4. Employee first name",
            "5. Employee second name (if applicable)",
            "6. Employee last name",
            "7. National Insurance number (if applicable)",
            "8. PAYE reference of employing company",
            "9. Date securities originally acquired (yyyy-mm-dd)",
            "10. Number of securities originally acquired (e.g. 100.00)",
            "11. Number of securities converted (e.g. 100.00)",
            "12. Market value per security of the securities after conversion £ (e.g. 10.1234)",
            "13. Total consideration given for the conversion £ (e.g. 10.1234)",
            "14. Total chargeable amount £ (e.g. 10.1234)",
            "15. Was PAYE operated? (yes/no)",
        ],
    },
    SheetInfo {
        scheme_family: SchemeFamily::Other,
        header_row_count: HEADER_ROW,
        sheet_name: "Other_Notional_V4",
        sheet_title: "Notional loans",
        rule_set_id: "ers-other-notional",
        headers: &[
            "1. Date of event (yyyy-mm-dd)",
            "2. Is the event in relation to a disclosable tax avoidance scheme? (yes/no)",
            "3. If yes, enter the eight-digit scheme reference number (SRN)",
            "4. Employee first name",
            "5. Employee second name (if applicable)",
            "6. Employee last name",
            "7. National Insurance number (if applicable)",
            "8. PAYE reference of employing company",
            "9. Date securities originally acquired (yyyy-mm-dd)",
            "10. Number of securities originally acquired (e.g. 100.00)",
            "11. Amount of notional loan discharged £ (e.g. 10.1234)",
            "12. Amount of notional loan outstanding £ (e.g. 10.1234)",
            "13. Was PAYE operated? (yes/no)",
        ],
    },
    SheetInfo {
        scheme_family: SchemeFamily::Other,
        header_row_count: HEADER_ROW,
        sheet_name: "Other_Enhancement_V4",
        sheet_title: "Artificial enhancement of market value",
        rule_set_id: "ers-other-enhancement",
        headers: &[
            "1. Date of event (yyyy-mm-dd)",
            "2. Is the event in relation to a disclosable tax avoidance scheme? (yes/no)",
            "3. If yes, enter the eight-digit scheme reference number (SRN)",
            "4. Employee first name",
            "5. Employee second name (if applicable)",
            "6. Employee last name",
            "7. National Insurance number (if applicable)",
            "8. PAYE reference of employing company",
            "9. Date securities originally acquired (yyyy-mm-dd)",
            "10. Number of securities originally acquired (e.g. 100.00)",
            "11. Unrestricted market value per security immediately before the enhancement £ (e.g. 10.1234)",
            "12. Unrestricted market value per security immediately after the enhancement £ (e.g. 10.1234)",
            "13. Total chargeable amount £ (e.g. 10.1234)",
            "14. Was PAYE operated? (yes/no)",
        ],
    },
    SheetInfo {
        scheme_family: SchemeFamily::Other,
        header_row_count: HEADER_ROW,
        sheet_name: "Other_Sold_V4",
        sheet_title: "Securities sold for more than market value",
        rule_set_id: "ers-other-sold",
        headers: &[
            "1. Date of event (yyyy-mm-dd)",
            "2. Is the event in relation to a disclosable tax avoidance scheme? (yes/no)",
            "3. If yes, enter the eight-digit scheme reference number (SRN)",
            "4. Employee first name",
            "5. Employee second name (if applicable)",
            "6. Employee last name",
            "7. National Insurance number (if applicable)",
            "8. PAYE reference of employing company",
            "9. Number of securities originally acquired (e.g. 100.00)",
            "10. Amount received on disposal £ (e.g. 10.1234)",
            "11. Total market value on disposal £ (e.g. 10.1234)",
            "12. Was PAYE operated? (yes/no)",
        ],
    },
];

// ==========================================
// SchemaRegistry - 只读注册表
// ==========================================
// 进程内单例，可在并发处理的多个文件之间安全共享
#[derive(Debug)]
pub struct SchemaRegistry {
    by_name: HashMap<&'static str, &'static SheetInfo>,
}

impl SchemaRegistry {
    /// 全局注册表（首次访问时建立索引）
    pub fn global() -> &'static SchemaRegistry {
        static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| SchemaRegistry {
            by_name: SHEETS.iter().map(|s| (s.sheet_name, s)).collect(),
        })
    }

    /// 按表名精确查找；未登记返回 None
    pub fn lookup(&self, sheet_name: &str) -> Option<&'static SheetInfo> {
        self.by_name.get(sheet_name).copied()
    }

    /// 全部模板（登记顺序）
    pub fn sheets(&self) -> &'static [SheetInfo] {
        SHEETS
    }

    /// 某计划族下的全部模板
    pub fn sheets_for(&self, family: SchemeFamily) -> impl Iterator<Item = &'static SheetInfo> {
        SHEETS.iter().filter(move |s| s.scheme_family == family)
    }
}
