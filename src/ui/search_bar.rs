use eframe::egui;

use crate::data::models::{SymbolDirectory, SymbolInfo};
use crate::state::ViewState;

const PLACEHOLDER: &str = "Select a symbol";

/// One dropdown entry
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolOption {
    pub symbol: String,
    pub label: String,
    pub sector: Option<String>,
}

/// What the user asked for this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    None,
    Select(String),
    ReloadSymbols,
}

pub fn option_label(symbol: &str, info: &SymbolInfo) -> String {
    format!("{} ({})", info.name, symbol)
}

pub fn symbol_options(symbols: &SymbolDirectory) -> Vec<SymbolOption> {
    symbols
        .iter()
        .map(|(symbol, info)| SymbolOption {
            symbol: symbol.clone(),
            label: option_label(symbol, info),
            sector: info.sector.clone(),
        })
        .collect()
}

/// Case-insensitive substring match against the whole rendered label,
/// so both company names and tickers hit.
pub fn filter_options<'a>(options: &'a [SymbolOption], query: &str) -> Vec<&'a SymbolOption> {
    let needle = query.trim().to_lowercase();
    options
        .iter()
        .filter(|o| needle.is_empty() || o.label.to_lowercase().contains(&needle))
        .collect()
}

pub fn render(ui: &mut egui::Ui, state: &ViewState, query: &mut String) -> SearchAction {
    let mut action = SearchAction::None;

    ui.horizontal(|ui| {
        if state.loading_symbols {
            ui.spinner();
            ui.label("Loading symbols...");
            return;
        }

        if let Some(err) = &state.symbols_error {
            ui.colored_label(
                egui::Color32::from_rgb(220, 50, 50),
                format!("Could not load symbols: {}", err),
            );
            if ui.button("Reload").clicked() {
                action = SearchAction::ReloadSymbols;
            }
            return;
        }

        let options = symbol_options(&state.symbols);
        let filtered = filter_options(&options, query);

        ui.label("Search:");
        ui.add(
            egui::TextEdit::singleline(query)
                .hint_text("name or ticker")
                .desired_width(180.0),
        );

        let selected_text = state
            .selected_symbol
            .as_deref()
            .map(|sym| match state.symbols.get(sym) {
                Some(info) => option_label(sym, info),
                None => sym.to_string(),
            })
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        egui::ComboBox::from_id_salt("symbol_select")
            .selected_text(selected_text)
            .width((ui.available_width() - 90.0).max(200.0))
            .height(360.0)
            .show_ui(ui, |ui| {
                if filtered.is_empty() {
                    ui.weak("No matching symbols");
                }
                for opt in &filtered {
                    let is_selected = state.selected_symbol.as_deref() == Some(opt.symbol.as_str());
                    let mut resp = ui.selectable_label(is_selected, &opt.label);
                    if let Some(sector) = &opt.sector {
                        resp = resp.on_hover_text(sector);
                    }
                    if resp.clicked() {
                        action = SearchAction::Select(opt.symbol.clone());
                    }
                }
            });

        ui.weak(format!("{} / {}", filtered.len(), options.len()));
    });

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> SymbolDirectory {
        let mut dir = SymbolDirectory::new();
        for (sym, name, sector) in [
            ("AAPL", "Apple Inc.", "Information Technology"),
            ("MSFT", "Microsoft Corp.", "Information Technology"),
            ("APA", "APA Corporation", "Energy"),
            ("XOM", "Exxon Mobil Corp.", "Energy"),
        ] {
            dir.insert(
                sym.to_string(),
                SymbolInfo {
                    name: name.to_string(),
                    sector: Some(sector.to_string()),
                },
            );
        }
        dir
    }

    fn labels(found: &[&SymbolOption]) -> Vec<String> {
        found.iter().map(|o| o.label.clone()).collect()
    }

    #[test]
    fn test_single_symbol_single_option() {
        let mut dir = SymbolDirectory::new();
        dir.insert(
            "AAPL".to_string(),
            SymbolInfo {
                name: "Apple Inc.".to_string(),
                sector: None,
            },
        );
        let options = symbol_options(&dir);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].label, "Apple Inc. (AAPL)");
        assert_eq!(options[0].symbol, "AAPL");
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let options = symbol_options(&directory());
        assert_eq!(filter_options(&options, "").len(), 4);
        assert_eq!(filter_options(&options, "   ").len(), 4);
    }

    #[test]
    fn test_match_is_case_insensitive_on_name() {
        let options = symbol_options(&directory());
        assert_eq!(labels(&filter_options(&options, "apple")), vec!["Apple Inc. (AAPL)"]);
        assert_eq!(labels(&filter_options(&options, "CORP")).len(), 3);
    }

    #[test]
    fn test_match_covers_full_label_not_just_ticker() {
        let options = symbol_options(&directory());
        // "(aapl)" only exists in the rendered label
        assert_eq!(labels(&filter_options(&options, "(aapl)")), vec!["Apple Inc. (AAPL)"]);
        // "ap" hits APA's ticker and Apple's name
        assert_eq!(
            labels(&filter_options(&options, "ap")),
            vec!["Apple Inc. (AAPL)", "APA Corporation (APA)"]
        );
    }

    #[test]
    fn test_sector_is_not_searched() {
        let options = symbol_options(&directory());
        assert!(filter_options(&options, "energy").is_empty());
    }
}
