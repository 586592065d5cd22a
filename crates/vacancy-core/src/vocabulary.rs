//! Fixed Russian display vocabulary: field labels, value translations and the
//! experience ordering used by the vacancy table.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

/// Header of the implicit row-number column.
pub const ROW_NUMBER_LABEL: &str = "№";

pub const YES: &str = "Да";
pub const NO: &str = "Нет";

pub const NET_SALARY_LABEL: &str = "С вычетом налогов";
pub const GROSS_SALARY_LABEL: &str = "Без вычета налогов";

/// Shown when a query leaves no vacancies.
pub const NOTHING_FOUND: &str = "Ничего не найдено";

/// Shown when no vacancy could be aggregated.
pub const NO_DATA: &str = "Нет данных";

/// Key hint of the terminal views.
pub const EXIT_HINT: &str = "q: выход";

const EXPERIENCE_LABELS: &[(&str, &str)] = &[
    ("noExperience", "Нет опыта"),
    ("between1And3", "От 1 года до 3 лет"),
    ("between3And6", "От 3 до 6 лет"),
    ("moreThan6", "Более 6 лет"),
];

const CURRENCY_LABELS: &[(&str, &str)] = &[
    ("AZN", "Манаты"),
    ("BYR", "Белорусские рубли"),
    ("EUR", "Евро"),
    ("GEL", "Грузинский лари"),
    ("KGS", "Киргизский сом"),
    ("KZT", "Тенге"),
    ("RUR", "Рубли"),
    ("UAH", "Гривны"),
    ("USD", "Доллары"),
    ("UZS", "Узбекский сум"),
];

// ── DisplayField ──────────────────────────────────────────────────────────────

/// A field of the vacancy table, addressed by its Russian label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayField {
    Name,
    Description,
    Skills,
    Experience,
    Premium,
    Employer,
    /// Composite "from - to (currency) (tax)" column.
    Salary,
    Area,
    PublishedAt,
    /// Currency name. Filterable, but folded into [`DisplayField::Salary`]
    /// when rendered.
    Currency,
}

impl DisplayField {
    /// Table columns in their default order.
    pub const COLUMNS: [DisplayField; 9] = [
        DisplayField::Name,
        DisplayField::Description,
        DisplayField::Skills,
        DisplayField::Experience,
        DisplayField::Premium,
        DisplayField::Employer,
        DisplayField::Salary,
        DisplayField::Area,
        DisplayField::PublishedAt,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DisplayField::Name => "Название",
            DisplayField::Description => "Описание",
            DisplayField::Skills => "Навыки",
            DisplayField::Experience => "Опыт работы",
            DisplayField::Premium => "Премиум-вакансия",
            DisplayField::Employer => "Компания",
            DisplayField::Salary => "Оклад",
            DisplayField::Area => "Название региона",
            DisplayField::PublishedAt => "Дата публикации вакансии",
            DisplayField::Currency => "Идентификатор валюты оклада",
        }
    }

    /// Resolve a label to a field. Recognises the table columns and the
    /// currency field.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::COLUMNS
            .into_iter()
            .chain(std::iter::once(DisplayField::Currency))
            .find(|f| f.label() == label)
    }

    /// Fields a query may sort by and select as output columns.
    pub fn is_column(self) -> bool {
        self != DisplayField::Currency
    }
}

impl std::fmt::Display for DisplayField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for DisplayField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

// ── Value translation ─────────────────────────────────────────────────────────

pub fn experience_label(experience_id: &str) -> Option<&'static str> {
    lookup(EXPERIENCE_LABELS, experience_id)
}

pub fn currency_label(code: &str) -> Option<&'static str> {
    lookup(CURRENCY_LABELS, code)
}

pub fn flag_label(value: bool) -> &'static str {
    if value {
        YES
    } else {
        NO
    }
}

/// Parse a yes/no answer. The empty string means "no".
pub fn parse_yes_no(token: &str) -> Option<bool> {
    match token {
        YES => Some(true),
        NO | "" => Some(false),
        _ => None,
    }
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|&(_, v)| v)
}

// ── ExperienceWeights ─────────────────────────────────────────────────────────

/// Ordinal weight per experience id used when sorting by experience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceWeights {
    weights: HashMap<String, u32>,
}

impl Default for ExperienceWeights {
    fn default() -> Self {
        Self::from_weights(
            EXPERIENCE_LABELS
                .iter()
                .enumerate()
                .map(|(i, &(id, _))| (id, i as u32)),
        )
    }
}

impl ExperienceWeights {
    pub fn from_weights<K: Into<String>>(weights: impl IntoIterator<Item = (K, u32)>) -> Self {
        Self {
            weights: weights.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Weight of `experience_id`; unknown ids sort after every known one.
    pub fn weight(&self, experience_id: &str) -> u32 {
        self.weights
            .get(experience_id)
            .copied()
            .unwrap_or(u32::MAX)
    }
}
