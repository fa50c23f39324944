//! Declarative chart description handed to the renderer.
//!
//! The serialized form is an ECharts `option` object, so the same value can
//! drive the native plot or be exported to a web chart unchanged.

use serde::{Deserialize, Serialize};

use crate::chart::series::{ChartSeries, Ohlc};
use crate::config;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub title: Title,
    pub tooltip: Tooltip,
    pub x_axis: CategoryAxis,
    pub y_axis: ValueAxis,
    pub data_zoom: Vec<DataZoom>,
    pub series: Vec<CandlestickSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
    pub left: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipTrigger {
    Axis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Cross,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub trigger: TooltipTrigger,
    pub axis_pointer: AxisPointer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisPointer {
    #[serde(rename = "type")]
    pub kind: PointerKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    Category,
}

/// Axis bound keyword understood by the chart runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisBound {
    #[serde(rename = "dataMin")]
    DataMin,
    #[serde(rename = "dataMax")]
    DataMax,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toggle {
    pub show: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLine {
    pub on_zero: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAxis {
    #[serde(rename = "type")]
    pub kind: AxisKind,
    pub data: Vec<String>,
    pub scale: bool,
    pub boundary_gap: bool,
    pub axis_line: AxisLine,
    pub split_line: Toggle,
    pub split_number: u32,
    pub min: AxisBound,
    pub max: AxisBound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueAxis {
    pub scale: bool,
    pub split_area: Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomKind {
    /// Mouse wheel / drag inside the plot area
    Inside,
    /// Visible range slider under the plot
    Slider,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataZoom {
    #[serde(rename = "type")]
    pub kind: ZoomKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    /// Percent of the category domain
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Candlestick,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandlestickSeries {
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub data: Vec<Ohlc>,
    pub item_style: ItemStyle,
}

/// `color`/`border_color` paint rising candles, the `0` variants falling ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStyle {
    pub color: String,
    pub color0: String,
    pub border_color: String,
    pub border_color0: String,
}

impl Default for ItemStyle {
    fn default() -> Self {
        Self {
            color: config::UP_COLOR.to_string(),
            color0: config::DOWN_COLOR.to_string(),
            border_color: config::UP_BORDER_COLOR.to_string(),
            border_color0: config::DOWN_BORDER_COLOR.to_string(),
        }
    }
}

/// Build the fixed candlestick layout around `series`.
pub fn build_chart_config(title: &str, series: &ChartSeries) -> ChartConfig {
    ChartConfig {
        title: Title {
            text: title.to_string(),
            left: 0,
        },
        tooltip: Tooltip {
            trigger: TooltipTrigger::Axis,
            axis_pointer: AxisPointer {
                kind: PointerKind::Cross,
            },
        },
        x_axis: CategoryAxis {
            kind: AxisKind::Category,
            data: series.category_data.clone(),
            scale: true,
            boundary_gap: false,
            axis_line: AxisLine { on_zero: false },
            split_line: Toggle { show: false },
            split_number: 20,
            min: AxisBound::DataMin,
            max: AxisBound::DataMax,
        },
        y_axis: ValueAxis {
            scale: true,
            split_area: Toggle { show: true },
        },
        data_zoom: vec![
            DataZoom {
                kind: ZoomKind::Inside,
                show: None,
                top: None,
                start: config::ZOOM_START,
                end: config::ZOOM_END,
            },
            DataZoom {
                kind: ZoomKind::Slider,
                show: Some(true),
                top: Some("90%".to_string()),
                start: config::ZOOM_START,
                end: config::ZOOM_END,
            },
        ],
        series: vec![CandlestickSeries {
            kind: SeriesKind::Candlestick,
            data: series.values.clone(),
            item_style: ItemStyle::default(),
        }],
    }
}

impl ChartConfig {
    pub fn title_text(&self) -> &str {
        &self.title.text
    }

    pub fn labels(&self) -> &[String] {
        &self.x_axis.data
    }

    pub fn candles(&self) -> &[Ohlc] {
        self.series.first().map(|s| s.data.as_slice()).unwrap_or(&[])
    }

    pub fn item_style(&self) -> ItemStyle {
        self.series
            .first()
            .map(|s| s.item_style.clone())
            .unwrap_or_default()
    }

    /// Initial visible window (start, end) in percent. The slider wins when
    /// both zoom controls are present; they are kept in sync anyway.
    pub fn initial_window(&self) -> (f64, f64) {
        self.data_zoom
            .iter()
            .find(|z| z.kind == ZoomKind::Slider)
            .or_else(|| self.data_zoom.first())
            .map(|z| (z.start, z.end))
            .unwrap_or((0.0, 100.0))
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
