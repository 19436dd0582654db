use inquire::{validator::Validation, CustomUserError, DateSelect, Select, Text};

use billed::{
    containers::parse_amount,
    document::{BillProof, Document},
    model::NewBillForm,
};

/// Категории расходов, которые предлагает форма.
const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

const MODAL_WIDTH: u32 = 800;

/// Документ поверх терминала.
pub struct TerminalDocument;

impl Document for TerminalDocument {
    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn modal_width(&self) -> u32 {
        MODAL_WIDTH
    }

    fn show_modal(&self, proof: &BillProof) {
        println!("Justificatif ({} px): {}", proof.width, proof.url);
    }
}

/// Запрашивает у пользователя поля нового расхода.
pub fn ask_form() -> anyhow::Result<NewBillForm> {
    let expense_type = Select::new("Type de dépense", EXPENSE_TYPES.to_vec()).prompt()?;

    let name = Text::new("Nom de la dépense").prompt()?;

    let date = DateSelect::new("Date").prompt()?;

    let amount = Text::new("Montant TTC")
        .with_validator(whole_number)
        .prompt()?;

    let vat = Text::new("TVA").prompt()?;

    let pct = Text::new("%")
        .with_default("20")
        .with_validator(number)
        .prompt()?;

    let commentary = Text::new("Commentaire").prompt()?;

    Ok(NewBillForm {
        expense_type: expense_type.to_owned(),
        name,
        date: date.format("%Y-%m-%d").to_string(),
        amount,
        vat,
        pct,
        commentary,
    })
}

/// Сумма учитывается только целой частью.
fn whole_number(s: &str) -> Result<Validation, CustomUserError> {
    if parse_amount(s).is_none() {
        return Ok(Validation::Invalid("should be a whole number".into()));
    }
    Ok(Validation::Valid)
}

fn number(s: &str) -> Result<Validation, CustomUserError> {
    if s.trim().parse::<f64>().is_err() {
        return Ok(Validation::Invalid("should be a number".into()));
    }
    Ok(Validation::Valid)
}
