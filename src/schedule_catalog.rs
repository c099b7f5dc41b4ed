//! # Schedule Catalog Module
//!
//! Static two-level lookup table: category → group → schedule document. Declaration order
//! is preserved because it drives keyboard layout. Unknown keys are never an error here;
//! they come back as empty lists or `None` and the dialogue decides what to tell the user.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use url::Url;

use crate::config::DocumentSourceConfig;
use crate::errors::BotError;

/// Fallback file name when a reference has no usable last segment
pub const DEFAULT_DOCUMENT_NAME: &str = "schedule.pdf";

/// Pointer to a schedule PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentRef {
    Remote(Url),
    Local(PathBuf),
}

impl DocumentRef {
    /// File name shown to the user when the document is delivered
    pub fn file_name(&self) -> String {
        let name = match self {
            DocumentRef::Remote(url) => url
                .path_segments()
                .and_then(|segments| segments.last())
                .map(|segment| {
                    urlencoding::decode(segment)
                        .map(|decoded| decoded.into_owned())
                        .unwrap_or_else(|_| segment.to_string())
                }),
            DocumentRef::Local(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
        };
        name.filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_DOCUMENT_NAME.to_string())
    }

    /// Whether the reference can currently be served. Remote references are always assumed to be.
    pub fn is_available(&self) -> bool {
        match self {
            DocumentRef::Remote(_) => true,
            DocumentRef::Local(path) => path.is_file(),
        }
    }
}

impl std::fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentRef::Remote(url) => write!(f, "{url}"),
            DocumentRef::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
struct Category {
    name: String,
    groups: Vec<(String, DocumentRef)>,
}

/// Read-only schedule lookup table
#[derive(Debug, Clone)]
pub struct ScheduleCatalog {
    categories: Vec<Category>,
}

impl ScheduleCatalog {
    /// Build a catalog from ordered entries.
    ///
    /// Rejects empty catalogs, categories without groups and duplicate keys.
    pub fn from_entries(
        entries: Vec<(String, Vec<(String, DocumentRef)>)>,
    ) -> Result<Self, BotError> {
        if entries.is_empty() {
            return Err(BotError::Catalog("catalog has no categories".to_string()));
        }

        let mut seen_categories = HashSet::new();
        let mut categories = Vec::with_capacity(entries.len());
        for (name, groups) in entries {
            if !seen_categories.insert(name.clone()) {
                return Err(BotError::Catalog(format!("duplicate category `{name}`")));
            }
            if groups.is_empty() {
                return Err(BotError::Catalog(format!("category `{name}` has no groups")));
            }
            let mut seen_groups = HashSet::new();
            for (group, _) in &groups {
                if !seen_groups.insert(group.as_str()) {
                    return Err(BotError::Catalog(format!(
                        "duplicate group `{group}` in category `{name}`"
                    )));
                }
            }
            categories.push(Category { name, groups });
        }

        Ok(Self { categories })
    }

    /// The Digital Institute schedule table, resolved against the configured document source
    pub fn builtin(source: &DocumentSourceConfig) -> Result<Self, BotError> {
        let resolve: Box<dyn Fn(&str) -> Result<DocumentRef, BotError>> = match source {
            DocumentSourceConfig::Remote { base_url } => {
                let base = directory_url(base_url);
                Box::new(move |relative: &str| {
                    base.join(relative).map(DocumentRef::Remote).map_err(|e| {
                        BotError::Catalog(format!("cannot resolve `{relative}`: {e}"))
                    })
                })
            }
            DocumentSourceConfig::Local { dir } => {
                let dir = dir.clone();
                Box::new(move |relative: &str| Ok(DocumentRef::Local(local_path(&dir, relative))))
            }
        };

        let mut entries = Vec::with_capacity(BUILTIN_SCHEDULE.len());
        for (category, groups) in BUILTIN_SCHEDULE {
            let mut resolved = Vec::with_capacity(groups.len());
            for (group, relative) in *groups {
                resolved.push((group.to_string(), resolve(*relative)?));
            }
            entries.push((category.to_string(), resolved));
        }

        Self::from_entries(entries)
    }

    /// All categories in declaration order
    pub fn list_categories(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    /// Groups of `category` in declaration order; empty for an unknown category
    pub fn list_groups(&self, category: &str) -> Vec<String> {
        self.find(category)
            .map(|c| c.groups.iter().map(|(group, _)| group.clone()).collect())
            .unwrap_or_default()
    }

    /// Document for `(category, group)`.
    ///
    /// Local files are checked for existence on every call.
    pub fn resolve_document(&self, category: &str, group: &str) -> Option<DocumentRef> {
        self.find(category)?
            .groups
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, doc)| doc)
            .filter(|doc| doc.is_available())
            .cloned()
    }

    fn find(&self, category: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == category)
    }
}

fn directory_url(base: &Url) -> Url {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn local_path(dir: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .fold(dir.to_path_buf(), |path, segment| path.join(segment))
}

type GroupTable = &'static [(&'static str, &'static str)];

/// Category → group → path relative to the schedule root (remote base URL or local directory)
const BUILTIN_SCHEDULE: &[(&str, GroupTable)] = &[
    (
        "I курс",
        &[
            ("ФИТ-251, МОА-251", "och/IC_1c_fit-251,moa-251_3.pdf"),
            ("ПМИ-251, ПИ-251, КБ-251", "och/IC_1c_pmi-251,pi-251,kb-251_4.pdf"),
            ("ПИз-251", "zaoch/IC_zaoch_1c_piz-251.pdf"),
            ("ПМИм-251", "och/IC_mag_1c_pmim-251.pdf"),
            ("МОАм-251", "och/IC_mag_1c_moam-251_2.pdf"),
            ("ПИм-251", "och/IC_mag_1c_pim-251_3.pdf"),
        ],
    ),
    (
        "II курс",
        &[
            ("ПМИ-241, ПИ-241, КБ-241", "och/IC_2c_pmi-241,pi-241, kb-241_4.pdf"),
            ("ФИТ-241, МОА-241", "och/IC_2c_fit-241,moa-241_2.pdf"),
            ("ПИз-241", "zaoch/IC_zaoch_2c_piz-241_2.pdf"),
            ("МОАм-241", "och/IC_mag_2c_moam-241_2.pdf"),
            ("ПИм-241", "och/IC_mag_2c_pim-241_2.pdf"),
            ("ПМИм-241", "och/IC_mag_2c_pmim-241_2.pdf"),
        ],
    ),
    (
        "III курс",
        &[
            ("ПМИ-231, ПИ-231, КБ-231", "och/IC_3c_pmi-231,pi-231,kb-231_7.pdf"),
            ("ФИТ-231, МОА-231", "och/IC_3c_fit-231,moa-231_3.pdf"),
            ("ПИз-231", "zaoch/IC_zaoch_3c_piz-231.pdf"),
        ],
    ),
    (
        "IV курс",
        &[
            ("ФИТ-221, МОА-221", "och/IC_4c_fit-221,moa-221_2.pdf"),
            ("ПМИ-221, ПИ-221, КБ-221", "och/IC_4c_pmi-221,pi-221_kb-221_3.pdf"),
            ("ПИз-221", "zaoch/IC_zaoch_4c_piz-221.pdf"),
        ],
    ),
    (
        "V курс",
        &[("ПИз-221", "zaoch/IC_zaoch_5c_piz-211_3.pdf")],
    ),
    (
        "Экзамены",
        &[
            (
                "ПМИ-251, ПИ-251, ФИТ-251, МОА-251, КБ-251",
                "exam/IC_1c_25-26_exam_pmi,pi,fit,moa,kb-251.pdf",
            ),
            (
                "ПМИ-241, ПИ-241, ФИТ-241, МОА-241, КБ-241",
                "exam/IC_2c_25-26_exam_pmi,pi,fit,moa,kb-241_2.pdf",
            ),
            (
                "ПМИ-231, ПИ-231, ФИТ-231, МОА-231, КБ-231",
                "exam/IC_3c_25-26_exam_pmi,pi,fit,moa,kb-231.pdf",
            ),
            (
                "ПМИ-221, ПИ-221, ФИТ-221, МОА-221, КБ-221",
                "exam/IC_4c_25-26_exam_pmi,pi,fit,moa,kb-221.pdf",
            ),
            ("ПИм-251", "exam/IC_1c_mag_25-26_exam_pim-251.pdf"),
            ("МОАм-251", "exam/IC_1c_mag_25-26_exam_moam-251.pdf"),
            ("ПМИм-251", "exam/IC_1c_mag_25-26_exam_pmim-251.pdf"),
            ("ПИм-241", "exam/IC_2c_mag_25-26_exam_pim-241_2.pdf"),
            ("МОАм-241", "exam/IC_2c_mag_25-26_exam_moam-241.pdf"),
            ("ПМИм-241", "exam/IC_1c_mag_25-26_exam_pmim-241.pdf"),
        ],
    ),
    (
        "Государственная итоговая аттестация",
        &[(
            "09.03.03 Прикладная информатика",
            "gia/IC_GIA_090303_z_5c_2025-2026.pdf",
        )],
    ),
];
