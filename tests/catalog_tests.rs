use std::path::PathBuf;

use kemsu_assistant::config::DocumentSourceConfig;
use kemsu_assistant::errors::BotError;
use kemsu_assistant::schedule_catalog::{DocumentRef, ScheduleCatalog};
use url::Url;

fn remote_catalog() -> ScheduleCatalog {
    ScheduleCatalog::builtin(&DocumentSourceConfig::Remote {
        base_url: Url::parse("https://kemsu.ru/upload/education/schedule/ic/").unwrap(),
    })
    .unwrap()
}

fn local(path: &str) -> DocumentRef {
    DocumentRef::Local(PathBuf::from(path))
}

/// Every category has at least one group
#[test]
fn test_every_category_has_groups() {
    let catalog = remote_catalog();
    for category in catalog.list_categories() {
        assert!(
            !catalog.list_groups(&category).is_empty(),
            "{category} has no groups"
        );
    }
}

/// Every catalog pair resolves in remote mode
#[test]
fn test_every_pair_resolves() {
    let catalog = remote_catalog();
    for category in catalog.list_categories() {
        for group in catalog.list_groups(&category) {
            assert!(
                catalog.resolve_document(&category, &group).is_some(),
                "{category} / {group} did not resolve"
            );
        }
    }
}

#[test]
fn test_unknown_keys_are_absent() {
    let catalog = remote_catalog();

    assert!(catalog.list_groups("VI курс").is_empty());
    assert!(catalog.list_groups("").is_empty());
    assert!(catalog.resolve_document("VI курс", "ПИз-251").is_none());
    assert!(catalog.resolve_document("I курс", "XYZ-999").is_none());
    // Groups are scoped to their category
    assert!(catalog
        .resolve_document("I курс", "ПМИ-231, ПИ-231, КБ-231")
        .is_none());
    // Matching is exact
    assert!(catalog.resolve_document("i курс", "ПИз-251").is_none());
    assert!(catalog.resolve_document("I курс", "ПИз-251 ").is_none());
}

#[test]
fn test_group_order_is_declaration_order() {
    let catalog = remote_catalog();
    assert_eq!(
        catalog.list_groups("I курс"),
        vec![
            "ФИТ-251, МОА-251",
            "ПМИ-251, ПИ-251, КБ-251",
            "ПИз-251",
            "ПМИм-251",
            "МОАм-251",
            "ПИм-251",
        ]
    );
}

#[test]
fn test_same_group_name_in_different_categories() {
    let catalog = remote_catalog();
    let fourth = catalog.resolve_document("IV курс", "ПИз-221").unwrap();
    let fifth = catalog.resolve_document("V курс", "ПИз-221").unwrap();
    assert_ne!(fourth, fifth);
}

#[test]
fn test_local_existence_is_checked_per_call() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = ScheduleCatalog::builtin(&DocumentSourceConfig::Local {
        dir: dir.path().to_path_buf(),
    })
    .unwrap();

    assert!(catalog.resolve_document("V курс", "ПИз-221").is_none());

    let path = dir.path().join("zaoch").join("IC_zaoch_5c_piz-211_3.pdf");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, b"%PDF").unwrap();

    assert_eq!(
        catalog.resolve_document("V курс", "ПИз-221"),
        Some(DocumentRef::Local(path.clone()))
    );

    std::fs::remove_file(&path).unwrap();
    assert!(catalog.resolve_document("V курс", "ПИз-221").is_none());
}

#[test]
fn test_from_entries_keeps_order() {
    let catalog = ScheduleCatalog::from_entries(vec![
        ("B".to_string(), vec![("b1".to_string(), local("b1.pdf"))]),
        (
            "A".to_string(),
            vec![
                ("a2".to_string(), local("a2.pdf")),
                ("a1".to_string(), local("a1.pdf")),
            ],
        ),
    ])
    .unwrap();

    assert_eq!(catalog.list_categories(), vec!["B", "A"]);
    assert_eq!(catalog.list_groups("A"), vec!["a2", "a1"]);
}

#[test]
fn test_from_entries_rejects_invalid_tables() {
    assert!(matches!(
        ScheduleCatalog::from_entries(vec![]),
        Err(BotError::Catalog(_))
    ));
    assert!(matches!(
        ScheduleCatalog::from_entries(vec![("A".to_string(), vec![])]),
        Err(BotError::Catalog(_))
    ));
    assert!(matches!(
        ScheduleCatalog::from_entries(vec![
            ("A".to_string(), vec![("a".to_string(), local("a.pdf"))]),
            ("A".to_string(), vec![("b".to_string(), local("b.pdf"))]),
        ]),
        Err(BotError::Catalog(_))
    ));
    assert!(matches!(
        ScheduleCatalog::from_entries(vec![(
            "A".to_string(),
            vec![
                ("a".to_string(), local("a.pdf")),
                ("a".to_string(), local("other.pdf")),
            ],
        )]),
        Err(BotError::Catalog(_))
    ));
}
