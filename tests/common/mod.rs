#![allow(dead_code)]

use chrono::NaiveDate;
use finboard_core::{
    currency::CurrencyCode,
    domain::{Frequency, ItemKind, RecurringItem, Schedule},
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn currency(code: &str) -> CurrencyCode {
    CurrencyCode::parse(code).expect("valid currency")
}

pub fn subscription(name: &str, amount: f64, frequency: Frequency, start: NaiveDate) -> RecurringItem {
    let schedule = Schedule::recurring(frequency, start, None).expect("valid schedule");
    RecurringItem::new(name, ItemKind::Subscription, amount, currency("USD"), schedule)
        .expect("valid item")
}

pub fn expense_on(name: &str, amount: f64, day: NaiveDate) -> RecurringItem {
    RecurringItem::new(
        name,
        ItemKind::Expense,
        amount,
        currency("USD"),
        Schedule::OneTime { date: day },
    )
    .expect("valid item")
}

/// Mixed list resembling what the subscriptions and expenses pages load.
pub fn sample_items() -> Vec<RecurringItem> {
    let mut gym = subscription("Gym Membership", 45.0, Frequency::Monthly, date(2023, 6, 10));
    gym.archive();

    let mut insurance = RecurringItem::new(
        "Car Insurance",
        ItemKind::Expense,
        600.0,
        currency("USD"),
        Schedule::recurring(Frequency::Biannually, date(2023, 3, 1), Some(date(2024, 3, 1)))
            .expect("valid schedule"),
    )
    .expect("valid item");
    insurance.category = Some("Insurance".into());

    let groceries = RecurringItem::new(
        "Groceries",
        ItemKind::Budget,
        400.0,
        currency("USD"),
        Schedule::Standing {
            frequency: Frequency::Monthly,
        },
    )
    .expect("valid item")
    .with_category("Food");

    vec![
        subscription("Netflix Premium", 22.99, Frequency::Monthly, date(2024, 1, 31))
            .with_category("Streaming"),
        subscription("Spotify", 10.99, Frequency::Monthly, date(2023, 11, 5))
            .with_category("Streaming"),
        gym,
        insurance,
        groceries,
        expense_on("Concert Tickets", 120.0, date(2024, 2, 20)).with_category("Entertainment"),
    ]
}
