use crate::chart::{ChartConfig, SpendRow};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Widget},
};

/// Bars of the spend chart, in the order of `rows`.
///
/// Bar values are amounts in ten-thousandths. A positive spend is lifted to
/// at least one full row of the chart, so it never reads as zero; the text
/// printed on the bar is always the real amount.
fn bars<'a>(rows: &'a [SpendRow], config: &ChartConfig) -> (Vec<Bar<'a>>, u64) {
    let spent: Vec<u64> = rows
        .iter()
        .map(|r| u64::try_from(r.spent.ten_thousandths()).unwrap_or(0))
        .collect();
    let max = spent.iter().copied().max().unwrap_or(0).max(1);
    let floor = max.div_ceil(config.height.max(1) as u64);

    let bars = rows
        .iter()
        .zip(spent)
        .map(|(row, value)| {
            let bar = Bar::default().label(Line::from(row.category.as_str()));
            if value == 0 {
                bar.value(0).text_value(String::new())
            } else {
                bar.value(value.max(floor)).text_value(row.spent.to_string())
            }
        })
        .collect();

    (bars, max)
}

/// Vertical bar chart of spend per category.
///
/// Draws a bordered block titled with the y-axis label, one bar per row left
/// to right, and the unrotated category names under the bars. There is no
/// legend.
#[derive(Debug, Clone, Copy)]
pub struct SpendChart<'a> {
    rows: &'a [SpendRow],
    config: &'a ChartConfig,
}

impl<'a> SpendChart<'a> {
    pub fn new(rows: &'a [SpendRow], config: &'a ChartConfig) -> Self {
        SpendChart { rows, config }
    }

    fn bar_width(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.category.chars().count())
            .chain(std::iter::once(self.config.bar_width))
            .max()
            .unwrap_or(1)
            .max(1)
    }

    /// Width and height the chart needs to show every bar and label.
    pub fn size(&self) -> (u16, u16) {
        let n = self.rows.len();
        let bars_span = n * self.bar_width() + n.saturating_sub(1) * self.config.gap;
        let width = bars_span.max(self.config.y_label.chars().count()) + 2;
        // bars, one label line, two borders
        let height = self.config.height.max(1) + 3;
        (clamp_u16(width), clamp_u16(height))
    }
}

impl Widget for SpendChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (bars, max) = bars(self.rows, self.config);
        BarChart::default()
            .block(Block::bordered().title(self.config.y_label.as_str()))
            .bar_width(clamp_u16(self.bar_width()))
            .bar_gap(clamp_u16(self.config.gap))
            .max(max)
            .data(BarGroup::default().bars(&bars))
            .render(area, buf);
    }
}

/// Renders the chart into an off-screen buffer sized by [`SpendChart::size`].
pub fn chart_buffer(rows: &[SpendRow], config: &ChartConfig) -> Buffer {
    let chart = SpendChart::new(rows, config);
    let (width, height) = chart.size();
    let area = Rect::new(0, 0, width, height);

    let mut buf = Buffer::empty(area);
    chart.render(area, &mut buf);
    buf
}

/// Text form of [`chart_buffer`]: one line per buffer row, trailing spaces
/// trimmed, each line ending in a newline.
pub fn render(rows: &[SpendRow], config: &ChartConfig) -> String {
    let buf = chart_buffer(rows, config);
    let area = buf.area;

    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let line: String = (area.left()..area.right())
            .map(|x| buf.cell((x, y)).map_or(" ", |cell| cell.symbol()))
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
