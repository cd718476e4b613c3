use crate::domain::model::{CreditorComparison, ValidationReport};
use crate::utils::error::Result;
use rust_xlsxwriter::{DocProperties, Format, Workbook, Worksheet};

pub const DEFAULT_FILE_NAME: &str = "validacao_credores_grupos_7_e_8.xlsx";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const SHEET_CORRECT: &str = "Credores Corretos";
pub const SHEET_DIVERGENT: &str = "Credores com Divergência";

pub const COLUMNS: [&str; 6] = [
    "Máscara Delimitada",
    "Credor",
    "Valor - Grupo 7",
    "Valor - Grupo 8",
    "Diferença",
    "Status",
];

const COLUMN_WIDTHS: [f64; 6] = [22.0, 60.0, 18.0, 18.0, 18.0, 14.0];
const CURRENCY_FORMAT: &str = r#""R$" #,##0.00;"R$" -#,##0.00"#;

/// Builds the result workbook entirely in memory.
pub fn export_report(report: &ValidationReport) -> Result<Vec<u8>> {
    let header = Format::new().set_bold();
    let currency = Format::new().set_num_format(CURRENCY_FORMAT);

    let mut workbook = Workbook::new();
    let properties = DocProperties::new()
        .set_title("Validação de Credores – Grupos 7 e 8")
        .set_subject("Comparação entre controles devedores (grupo 7) e credores (grupo 8)");
    workbook.set_properties(&properties);

    let correct = report.correct();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_CORRECT)?;
    write_sheet(worksheet, &correct, &header, &currency)?;

    let divergent = report.divergent();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_DIVERGENT)?;
    write_sheet(worksheet, &divergent, &header, &currency)?;

    let buffer = workbook.save_to_buffer()?;
    tracing::debug!(
        correct = correct.len(),
        divergent = divergent.len(),
        bytes = buffer.len(),
        "Workbook generated"
    );

    Ok(buffer)
}

fn write_sheet(
    worksheet: &mut Worksheet,
    rows: &[&CreditorComparison],
    header: &Format,
    currency: &Format,
) -> Result<()> {
    for (col, (title, width)) in COLUMNS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *title, header)?;
        worksheet.set_column_width(col, width)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (index, comparison) in rows.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_string(row, 0, &comparison.mask)?;
        worksheet.write_string(row, 1, &comparison.creditor)?;
        worksheet.write_number_with_format(row, 2, comparison.group7, currency)?;
        worksheet.write_number_with_format(row, 3, comparison.group8, currency)?;
        worksheet.write_number_with_format(row, 4, comparison.difference, currency)?;
        worksheet.write_string(row, 5, comparison.status.label())?;
    }

    Ok(())
}
