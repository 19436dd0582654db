/// Маршруты приложения. `to_string()` даёт путь для колбэка навигации.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Route {
    #[display(fmt = "/")]
    Login,
    #[display(fmt = "#employee/bills")]
    Bills,
    #[display(fmt = "#employee/bill/new")]
    NewBill,
    #[display(fmt = "#admin/dashboard")]
    Dashboard,
}
