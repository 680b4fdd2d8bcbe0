//! `finboard_cli`: renders a JSON list of items the way the dashboard pages do.

pub mod style;
pub mod table;

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use clap::Parser;
use tracing::{info, warn};

use crate::config::{Config, ConfigManager, ViewMode};
use crate::currency::{format_currency_value, LocaleConfig};
use crate::domain::{parse_date, RecurringItem, Schedule};
use crate::errors::{FinboardError, Result};
use crate::list::{ListQuery, MonthToken, SearchFilter, SortDirection, SortField, SortSpec};
use crate::schedule::{RenewalProjection, RenewalProjector, Urgency};
use crate::time::{Clock, FixedClock, SystemClock};
use crate::utils::build_info;

use self::style::UiStyle;
use self::table::Table;

const HEADERS: [&str; 7] = ["Name", "Kind", "Category", "Amount", "Schedule", "Next", "Due"];

#[derive(Parser, Debug, Clone)]
#[command(
    name = "finboard_cli",
    version,
    about = "Filter, sort, and project renewals for subscriptions, budgets, and expenses"
)]
pub struct Cli {
    /// JSON file holding an array of items.
    #[arg(required_unless_present = "build_info")]
    pub items: Option<PathBuf>,

    /// Case-insensitive substring matched against item names.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact category label.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Restrict to items active in this month (YYYY-MM).
    #[arg(short, long, value_parser = parse_month)]
    pub month: Option<MonthToken>,

    /// name, amount, or date. Defaults to the configured sort.
    #[arg(long, value_parser = parse_sort_field)]
    pub sort: Option<SortField>,

    #[arg(long)]
    pub desc: bool,

    /// Hide archived items.
    #[arg(long)]
    pub active_only: bool,

    /// Pin "today" (YYYY-MM-DD) instead of reading the system clock.
    #[arg(long, value_parser = parse_day)]
    pub today: Option<NaiveDate>,

    /// Config file; defaults to $FINBOARD_HOME/config.json.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable color and box-drawing characters.
    #[arg(long)]
    pub plain: bool,

    /// card or list. Defaults to the configured view mode.
    #[arg(long, value_parser = parse_view)]
    pub view: Option<ViewMode>,

    /// Print build metadata and exit.
    #[arg(long)]
    pub build_info: bool,
}

fn parse_month(value: &str) -> std::result::Result<MonthToken, String> {
    MonthToken::parse(value).map_err(|err| err.to_string())
}

fn parse_view(value: &str) -> std::result::Result<ViewMode, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "card" | "cards" => Ok(ViewMode::Card),
        "list" | "table" => Ok(ViewMode::List),
        other => Err(format!("unknown view `{other}`; expected card or list")),
    }
}

fn parse_day(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(value).map_err(|err| err.to_string())
}

/// Parses a sort field, suggesting the closest valid name on a typo.
pub fn parse_sort_field(value: &str) -> std::result::Result<SortField, String> {
    value.parse::<SortField>().map_err(|err| {
        let closest = SortField::ALL
            .into_iter()
            .map(|field| {
                let score = strsim::jaro_winkler(&value.to_ascii_lowercase(), field.as_str());
                (field, score)
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .filter(|(_, score)| *score >= 0.7);
        match closest {
            Some((field, _)) => format!("{err}; did you mean `{field}`?"),
            None => format!("{err}; expected one of name, amount, date"),
        }
    })
}

/// Executes one invocation, writing the rendered table to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    if cli.build_info {
        writeln!(out, "{}", build_info::current().summary())?;
        return Ok(());
    }
    let items_path = cli
        .items
        .clone()
        .ok_or_else(|| FinboardError::Validation("an items file is required".into()))?;

    let config = match &cli.config {
        Some(path) => ConfigManager::new(path.clone()).load()?,
        None => ConfigManager::default_location().load()?,
    };
    let items = load_items(&items_path)?;
    info!(path = %items_path.display(), count = items.len(), "items loaded");

    let clock: Box<dyn Clock> = match cli.today {
        Some(day) => Box::new(FixedClock::new(day)),
        None => Box::new(SystemClock),
    };
    let projector = RenewalProjector::new(clock.as_ref());

    let query = build_query(&cli, &config);
    let visible = visible_rows(&query, &items, &config);

    let style = if cli.plain {
        UiStyle::plain()
    } else {
        UiStyle::detect(config.ui_color_enabled, false)
    };
    let title = match &query.month {
        Some(month) => format!("Items for {month}"),
        None => "Items".to_string(),
    };
    let mut table = Table::new(Some(title), &HEADERS);
    let locale = config.locale_config();
    for item in &visible {
        let (cells, badge) = item_row(item, &projector, &config, &locale);
        table.add_row(cells, badge);
    }

    let rendered = match cli.view.unwrap_or(config.view_mode) {
        ViewMode::List => table.render(&style),
        ViewMode::Card => table.render_cards(&style),
    };
    write!(out, "{rendered}")?;
    writeln!(out, "{} of {} items shown", visible.len(), items.len())?;
    Ok(())
}

/// Cells for one item. A failed projection leaves Next and Due blank instead
/// of aborting the listing.
fn item_row<C: Clock>(
    item: &RecurringItem,
    projector: &RenewalProjector<C>,
    config: &Config,
    locale: &LocaleConfig,
) -> (Vec<String>, Option<Urgency>) {
    let projection = match projector.project_item(item) {
        Ok(projection) => Some(projection),
        Err(err) => {
            warn!(name = %item.name, %err, "renewal projection failed");
            None
        }
    };
    let badge = projection
        .flatten()
        .as_ref()
        .and_then(|projection| config.urgency.badge_for(projection));
    let (next, due) = match &projection {
        Some(projection) => (
            next_label(projection.as_ref()),
            due_label(projection.as_ref(), badge.map(|urgency| urgency.to_string())),
        ),
        None => (String::new(), String::new()),
    };
    let cells = vec![
        item.name.clone(),
        item.kind.to_string(),
        item.category.clone().unwrap_or_else(|| "-".into()),
        format_currency_value(item.amount, &item.currency, locale, &config.format),
        schedule_label(&item.schedule),
        next,
        due,
    ];
    (cells, badge)
}

/// Command-line flags win over configured defaults.
pub fn build_query(cli: &Cli, config: &Config) -> ListQuery {
    let search = SearchFilter::new()
        .with_query(cli.search.as_deref())
        .with_category(cli.category.as_deref())
        .active_only(cli.active_only);
    let mut sort = config.default_sort();
    if let Some(field) = cli.sort {
        sort = SortSpec::new(field, SortDirection::Asc);
    }
    if cli.desc {
        sort.direction = SortDirection::Desc;
    }
    ListQuery::new()
        .with_search(search)
        .with_month(cli.month)
        .with_sort(Some(sort))
}

/// Applies the query, sorting amounts in the display currency when every
/// item's currency has a configured rate.
fn visible_rows<'a>(
    query: &ListQuery,
    items: &'a [RecurringItem],
    config: &Config,
) -> Vec<&'a RecurringItem> {
    match config.display_rates().convert_all(items) {
        Ok(converted) => query
            .apply(&converted)
            .into_iter()
            .map(|row| row.item)
            .collect(),
        Err(err) => {
            warn!(%err, "amount ordering falls back to unconverted values");
            query.apply(items)
        }
    }
}

/// Reads items, skipping rows that fail to parse or validate.
pub fn load_items(path: &Path) -> Result<Vec<RecurringItem>> {
    let data = fs::read_to_string(path)?;
    let raw: Vec<serde_json::Value> = serde_json::from_str(&data)?;
    let mut items = Vec::with_capacity(raw.len());
    for (idx, value) in raw.into_iter().enumerate() {
        let parsed = serde_json::from_value::<RecurringItem>(value)
            .map_err(FinboardError::from)
            .and_then(|item| item.validate().map(|_| item));
        match parsed {
            Ok(item) => items.push(item),
            Err(err) => warn!(row = idx, %err, "skipping invalid item"),
        }
    }
    Ok(items)
}

fn schedule_label(schedule: &Schedule) -> String {
    match schedule {
        Schedule::OneTime { date } => format!("Once on {date}"),
        Schedule::Recurring {
            frequency,
            end_date: Some(end),
            ..
        } => format!("{frequency} until {end}"),
        Schedule::Recurring { frequency, .. } | Schedule::Standing { frequency } => {
            frequency.to_string()
        }
    }
}

fn next_label(projection: Option<&RenewalProjection>) -> String {
    match projection {
        Some(RenewalProjection {
            next_renewal: Some(date),
            ..
        }) => date.to_string(),
        Some(_) => "ended".into(),
        None => "every period".into(),
    }
}

fn due_label(projection: Option<&RenewalProjection>, badge: Option<String>) -> String {
    let Some(projection) = projection else {
        return String::new();
    };
    let when = match projection.days_until_renewal {
        _ if projection.is_ended => return String::new(),
        0 => "today".to_string(),
        1 => "in 1 day".to_string(),
        days => format!("in {days} days"),
    };
    match badge {
        Some(badge) => format!("{when} ({badge})"),
        None => when,
    }
}
