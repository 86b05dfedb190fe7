//! Built-in sidebar menus, used until the backend stores an edited tree.

use crate::domain::menu::{MenuItem, SubItem};
use crate::domain::scope::Scope;

pub fn default_menu(scope: Scope) -> Vec<MenuItem> {
    match scope {
        Scope::Admin => admin_menu(),
        Scope::Employee => employee_menu(),
    }
}

fn admin_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::leaf("Dashboard", "/dashboard", Some("dashboard")),
        MenuItem::group(
            "Attendance",
            Some("calendar"),
            vec![
                SubItem::section("Daily"),
                SubItem::link("Attendance Log", "/attendance/log"),
                SubItem::link("Leave Requests", "/leave/requests"),
                SubItem::section("Reports"),
                SubItem::link("Timesheets", "/timesheets"),
            ],
        ),
        MenuItem::group(
            "CRM",
            Some("pipeline"),
            vec![
                SubItem::link("Leads", "/crm/leads"),
                SubItem::link("Pipeline", "/crm/pipeline"),
            ],
        ),
        MenuItem::leaf("Helpdesk", "/helpdesk/tickets", Some("ticket")),
        MenuItem::leaf("Payouts", "/payouts", Some("wallet")),
        MenuItem::group(
            "Settings",
            Some("settings"),
            vec![
                SubItem::link("Sidebar Access", "/settings/sidebar-access"),
                SubItem::link("Route Permissions", "/settings/route-permissions"),
                SubItem::link("Sidebar Menu", "/settings/sidebar-menu"),
            ],
        ),
    ]
}

fn employee_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::leaf("Home", "/home", Some("home")),
        MenuItem::leaf("Attendance", "/attendance", Some("calendar")),
        MenuItem::leaf("Leave", "/leave", Some("plane")),
        MenuItem::leaf("Timesheets", "/timesheets", Some("clock")),
        MenuItem::leaf("Work Cards", "/work-cards", Some("clipboard")),
        MenuItem::leaf("Payroll", "/payroll", Some("wallet")),
        MenuItem::leaf("Helpdesk", "/helpdesk", Some("ticket")),
    ]
}
