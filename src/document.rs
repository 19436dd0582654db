use std::sync::Arc;

/// Колбэк навигации, получает путь маршрута.
pub type OnNavigate = Arc<dyn Fn(&str) + Send + Sync>;

/// Доступ к окружению, в котором отрисован интерфейс.
pub trait Document: Send + Sync {
    /// Показывает пользователю блокирующее сообщение.
    fn alert(&self, message: &str);

    /// Ширина модального окна с чеком.
    fn modal_width(&self) -> u32;

    /// Открывает модальное окно с изображением чека.
    fn show_modal(&self, proof: &BillProof);
}

/// Содержимое модального окна с чеком.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillProof {
    pub url: String,
    pub width: u32,
}
