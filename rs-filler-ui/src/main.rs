use std::collections::BTreeSet;
use std::env;
use std::time::Duration;

use eframe::{egui, Frame};
use egui::Context;
use log::{debug, warn};
use serde::Deserialize;

use reqwest::blocking::Client;
use reqwest::Result;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Output unit on the UI side, sent as the `type` query parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
enum OutputType {
    Letters,
    Words,
    Sentences,
    Paragraphs,
}

impl OutputType {
    const ALL: [OutputType; 4] = [
        OutputType::Letters,
        OutputType::Words,
        OutputType::Sentences,
        OutputType::Paragraphs,
    ];

    fn query_value(self) -> &'static str {
        match self {
            OutputType::Letters => "letters",
            OutputType::Words => "words",
            OutputType::Sentences => "sentences",
            OutputType::Paragraphs => "paragraphs",
        }
    }

    fn label(self) -> &'static str {
        match self {
            OutputType::Letters => "Letters",
            OutputType::Words => "Words",
            OutputType::Sentences => "Sentences",
            OutputType::Paragraphs => "Paragraphs",
        }
    }

    /// Same ceilings as the server.
    fn ceiling(self) -> u64 {
        match self {
            OutputType::Letters => 1_000_000,
            OutputType::Words => 250_000,
            OutputType::Sentences => 25_000,
            OutputType::Paragraphs => 5_000,
        }
    }
}

/// Subset of `/v1/loaded_dictionary` shown in the status line.
#[derive(Debug, Deserialize)]
struct LoadedDictionary {
    name: Option<String>,
    distinct: usize,
    rows: usize,
    valid: bool,
}

/// REST context holding a reusable blocking HTTP client.
struct RESTContext {
    client: Client,
    base_url: String,
}

impl RESTContext {
    /// Creates a new REST context with a timeout.
    ///
    /// The server address comes from `FILLER_SERVER_URL`.
    fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::new(5, 0))
            .build()?;
        let base_url = env::var("FILLER_SERVER_URL")
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        debug!("Talking to {}", base_url);
        Ok(Self { client, base_url })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Sends a GET request to `/v1/generate` with query parameters.
    ///
    /// A rejected request still yields the server's explanation.
    fn get_generated(&self, params: &[(String, String)]) -> Result<String> {
        let response = self.client
            .get(self.url("/v1/generate"))
            .query(params)
            .send()?;
        response.text()
    }

    /// Sends a GET request to `/v1/dictionaries`.
    fn get_dictionaries(&self) -> Result<String> {
        let response = self.client
            .get(self.url("/v1/dictionaries"))
            .send()?
            .error_for_status()?;
        response.text()
    }

    /// Sends a GET request to `/v1/loaded_dictionary`.
    fn get_loaded_dictionary(&self) -> Result<LoadedDictionary> {
        let response = self.client
            .get(self.url("/v1/loaded_dictionary"))
            .send()?
            .error_for_status()?;
        response.json()
    }

    /// Sends a PUT request to `/v1/load_dictionaries` with query parameters.
    fn put_load_dictionaries(&self, param: &str) -> Result<String> {
        let response = self.client
            .put(self.url("/v1/load_dictionaries"))
            .query(&[("names", param)])
            .send()?
            .error_for_status()?;
        response.text()
    }
}

/// Global UI state (MUST persist between frames in egui).
struct FillerUI {
    rest: RESTContext,
    output: Option<String>,
    status: String,

    output_type: OutputType,
    min: u64,
    max: u64,

    use_seed: bool,
    seed: u64,

    available_dictionaries: Vec<String>,
    selected_dictionaries: BTreeSet<String>,
}

impl FillerUI {
    /// Initializes the UI with sane defaults.
    fn new() -> Result<Self> {
        let mut filler = Self {
            rest: RESTContext::new()?,
            output: None,
            status: String::new(),

            output_type: OutputType::Words,
            min: 1,
            max: 100,

            use_seed: false,
            seed: 0,

            available_dictionaries: Vec::new(),
            selected_dictionaries: BTreeSet::new(),
        };
        filler.get_dictionaries();
        filler.get_loaded_dictionary();
        Ok(filler)
    }

    /// Builds the query parameters for the API.
    ///
    /// The seed is only sent when fixed.
    fn build_query(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("type".to_owned(), self.output_type.query_value().to_owned()),
            ("min".to_owned(), self.min.to_string()),
            ("max".to_owned(), self.max.to_string()),
        ];
        if self.use_seed {
            params.push(("seed".to_owned(), self.seed.to_string()));
        }
        params
    }

    /// Performs the generation request.
    fn get_generated(&mut self) {
        let params = self.build_query();
        match self.rest.get_generated(&params) {
            Ok(text) => self.output = Some(text),
            Err(e) => self.output = Some(format!("Error: {e}")),
        }
    }

    /// Performs the get dictionaries request.
    fn get_dictionaries(&mut self) {
        match self.rest.get_dictionaries() {
            Ok(names) => self.available_dictionaries = split_lines(&names),
            Err(e) => {
                warn!("Cannot list dictionaries: {e}");
                self.status = format!("Error: {e}");
            }
        }
    }

    /// Refreshes the status line and the checked dictionaries.
    fn get_loaded_dictionary(&mut self) {
        match self.rest.get_loaded_dictionary() {
            Ok(loaded) => {
                let name = loaded.name.unwrap_or_default();
                self.selected_dictionaries = name
                    .split('+')
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect();
                self.status = format!(
                    "{}: {} distinct words, {} lengths{}",
                    name,
                    loaded.distinct,
                    loaded.rows,
                    if loaded.valid { "" } else { " (too small to generate)" }
                );
            }
            Err(e) => self.status = format!("Error: {e}"),
        }
    }

    /// Performs the load dictionaries request.
    fn put_load_dictionaries(&mut self) {
        let names = self.selected_dictionaries.iter().cloned().collect::<Vec<_>>().join(",");
        match self.rest.put_load_dictionaries(&names) {
            Ok(_) => self.get_loaded_dictionary(),
            Err(e) => self.status = format!("Error: {e}"),
        }
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

impl eframe::App for FillerUI {
    /// UI update loop (called every frame).
    fn update(&mut self, ctx: &Context, _: &mut Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {

            egui::Grid::new("filler_grid")
                .num_columns(2)
                .spacing([20.0, 6.0])
                .striped(true)
                .show(ui, |ui| {

                    // output type
                    ui.label("Output type");
                    ui.horizontal(|ui| {
                        for output_type in OutputType::ALL {
                            ui.radio_value(&mut self.output_type, output_type, output_type.label());
                        }
                    });
                    ui.end_row();

                    let ceiling = self.output_type.ceiling();

                    // bounds
                    ui.label("Minimum");
                    ui.add(
                        egui::DragValue::new(&mut self.min)
                            .range(1..=ceiling)
                            .speed(1),
                    );
                    ui.end_row();

                    ui.label("Maximum");
                    ui.add(
                        egui::DragValue::new(&mut self.max)
                            .range(self.min..=ceiling)
                            .speed(1),
                    );
                    ui.end_row();

                    // seed
                    ui.checkbox(&mut self.use_seed, "Fixed seed");
                    if self.use_seed {
                        ui.add(egui::DragValue::new(&mut self.seed));
                    } else {
                        ui.label("Random output on every click");
                    }
                    ui.end_row();

                    ui.separator();
                    ui.end_row();

                    // dictionaries
                    ui.label("Dictionaries");
                    let mut selection_changed = false;
                    ui.vertical(|ui| {
                        for name in &self.available_dictionaries {
                            let mut checked = self.selected_dictionaries.contains(name);
                            if ui.checkbox(&mut checked, name).changed() {
                                if checked {
                                    selection_changed = true;
                                    self.selected_dictionaries.insert(name.clone());
                                } else if self.selected_dictionaries.len() > 1 {
                                    selection_changed = true;
                                    self.selected_dictionaries.remove(name);
                                }
                            }
                        }
                    });
                    ui.end_row();

                    if selection_changed {
                        self.put_load_dictionaries();
                    }

                    ui.label("");
                    ui.label(&self.status);
                    ui.end_row();

                    // Generate button
                    if ui
                        .add_sized([200.0, 40.0], egui::Button::new("Generate"))
                        .clicked()
                    {
                        self.get_generated();
                    }
                    ui.end_row();
                });

            ui.separator();

            // Output
            egui::ScrollArea::vertical().show(ui, |ui| {
                match &self.output {
                    Some(text) => ui.label(text),
                    None => ui.label("Click Generate to start"),
                };
            });
        });
    }
}

/// Application entry point.
fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 520.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "rs-filler",
        options,
        Box::new(|_| Ok(Box::new(FillerUI::new()?))),
    )
}
