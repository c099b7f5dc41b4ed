//! # Localization Tests
//!
//! Message retrieval and formatting against the bundled Russian messages.

use kemsu_assistant::bot::dialogue_manager::MenuLabels;
use kemsu_assistant::localization::LocalizationManager;

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_localization() -> LocalizationManager {
        LocalizationManager::new().expect("Failed to create localization manager")
    }

    #[test]
    fn test_get_message_existing_key() {
        let manager = setup_localization();
        assert_eq!(
            manager.get_message("greeting"),
            "Привет! Я помощник Института цифры КемГУ."
        );
    }

    #[test]
    fn test_get_message_nonexistent_key() {
        let manager = setup_localization();
        let message = manager.get_message("nonexistent-key");
        assert!(message.starts_with("Missing translation:"));
    }

    #[test]
    fn test_get_message_with_args() {
        let manager = setup_localization();
        let message = manager.get_message_with_args(
            "schedule-remote-fallback",
            &[("url", "https://kemsu.ru/a.pdf")],
        );
        assert_eq!(
            message,
            "Не удалось загрузить файл напрямую.\nВот ссылка на расписание:\nhttps://kemsu.ru/a.pdf"
        );
    }

    #[test]
    fn test_menu_labels() {
        let labels = MenuLabels::from_localization(&setup_localization());
        assert_eq!(labels.news, "Новости");
        assert_eq!(labels.schedule, "Расписание");
        assert_eq!(labels.back, "Назад");
    }

    #[test]
    fn test_help_keeps_blank_line() {
        let manager = setup_localization();
        let help = manager.get_message("help-text");
        assert!(help.starts_with("Я умею:\n"));
        assert!(help.contains("\n\nКоманда /start"));
    }
}
