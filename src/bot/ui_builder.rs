//! UI Builder module for creating reply keyboards

use teloxide::types::{KeyboardButton, KeyboardMarkup};

use super::dialogue_manager::Keyboard;

/// Create a resized reply keyboard from rows of labels
pub fn create_reply_keyboard(keyboard: &Keyboard) -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = keyboard
        .rows
        .iter()
        .map(|row| row.iter().map(|label| KeyboardButton::new(label.as_str())).collect())
        .collect();

    KeyboardMarkup::new(rows).resize_keyboard()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_preserved() {
        let keyboard = Keyboard {
            rows: vec![
                vec!["ФИТ-251, МОА-251".to_string()],
                vec!["Назад".to_string()],
            ],
        };
        let markup = create_reply_keyboard(&keyboard);

        assert_eq!(markup.keyboard.len(), 2);
        assert_eq!(markup.keyboard[0][0].text, "ФИТ-251, МОА-251");
        assert_eq!(markup.keyboard[1][0].text, "Назад");
    }
}
