//! Spend chart: per-category withdrawal totals drawn as a vertical bar chart.
//!
//! Data preparation ([`totals`], [`spend_table`]) is kept apart from drawing
//! ([`chart_buffer`], a ratatui `BarChart` rendered off-screen) so the numbers
//! can be checked without a display.

mod config;
mod render;

pub use config::{ChartConfig, HEIGHT_ENV_VAR};
pub use render::{SpendChart, chart_buffer, render};

use crate::engine::{Amount, Category};
use ratatui::{Terminal, TerminalOptions, Viewport, backend::CrosstermBackend, layout::Rect};
use std::io::{self, IsTerminal, Write};

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendRow {
    pub category: String,
    pub spent: Amount,
}

/// Total spent per category, as a non-negative amount, in input order.
pub fn totals<'a, I>(categories: I) -> Vec<Amount>
where
    I: IntoIterator<Item = &'a Category>,
{
    categories.into_iter().map(|c| -c.withdrawals()).collect()
}

pub fn spend_table<'a, I>(categories: I) -> Vec<SpendRow>
where
    I: IntoIterator<Item = &'a Category>,
{
    let categories: Vec<&Category> = categories.into_iter().collect();
    let spent = totals(categories.iter().copied());

    categories
        .into_iter()
        .zip(spent)
        .map(|(c, spent)| SpendRow {
            category: c.name().to_owned(),
            spent,
        })
        .collect()
}

pub fn write_spend_chart<'a, I, W>(categories: I, config: &ChartConfig, mut out: W) -> io::Result<()>
where
    I: IntoIterator<Item = &'a Category>,
    W: Write,
{
    let rows = spend_table(categories);
    log::debug!("Rendering spend chart for {} categories", rows.len());

    out.write_all(render(&rows, config).as_bytes())?;
    out.flush()
}

/// Draws the chart on stdout, using [`ChartConfig::from_env`].
///
/// On a terminal the chart is drawn inline below the cursor; otherwise the
/// text form from [`render`] is written.
pub fn create_spend_chart<'a, I>(categories: I) -> io::Result<()>
where
    I: IntoIterator<Item = &'a Category>,
{
    let config = ChartConfig::from_env();
    let stdout = io::stdout();
    if !stdout.is_terminal() {
        return write_spend_chart(categories, &config, stdout.lock());
    }

    let rows = spend_table(categories);
    let chart = SpendChart::new(&rows, &config);
    let (width, height) = chart.size();
    log::debug!("Drawing spend chart for {} categories on the terminal", rows.len());

    let mut terminal = Terminal::with_options(
        CrosstermBackend::new(stdout),
        TerminalOptions {
            viewport: Viewport::Inline(height),
        },
    )?;
    terminal.draw(|frame| {
        let area = frame.area();
        let target = Rect {
            width: width.min(area.width),
            height: height.min(area.height),
            ..area
        };
        frame.render_widget(chart, target);
    })?;
    drop(terminal);

    writeln!(io::stdout())
}
