//! Single-prediction demo driver.
//!
//! Loads the model and vocabularies artifacts, reads one prediction request
//! from a JSON file, and prints the verdict with a text gauge. This is the
//! minimal stand-in for the interactive form the crate normally sits
//! behind.
//!
//! Usage:
//!   predict --model PATH --vocab PATH --input PATH
//!   predict --vocab PATH --template
//!
//! Options:
//!   --model PATH     Model artifact (JSON)
//!   --vocab PATH     Vocabularies artifact (JSON)
//!   --input PATH     Prediction request (JSON, see --template)
//!   --template       Print a request template filled with the form's
//!                    preset values and the first known class of each
//!                    categorical field, then exit

use std::fs;
use std::process::ExitCode;

use serde::{Deserialize, Serialize};

use gridcast::{CategoricalField, FeatureVectorBuilder, PredictContext, PredictionResult};

/// One prediction request: the 16 raw values, categoricals as the
/// human-readable strings the vocabularies know.
#[derive(Debug, Serialize, Deserialize)]
struct PredictRequest {
    team: String,
    driver_surname: String,
    driver_forename: String,
    circuit: String,
    car_number: String,
    grid_position: u32,
    round: u32,
    driver_age: u32,
    driver_prior_races: u32,
    team_prior_races: u32,
    driver_avg_finish: f32,
    team_avg_finish: f32,
    driver_track_avg_finish: f32,
    team_track_avg_finish: f32,
    driver_home_race: bool,
    team_home_race: bool,
}

#[derive(Debug, Default)]
struct Args {
    model: Option<String>,
    vocab: Option<String>,
    input: Option<String>,
    template: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--model" => args.model = Some(iter.next().ok_or("--model needs a path")?),
            "--vocab" => args.vocab = Some(iter.next().ok_or("--vocab needs a path")?),
            "--input" => args.input = Some(iter.next().ok_or("--input needs a path")?),
            "--template" => args.template = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

/// Request template: the interactive form's preset values, with the first
/// known class of each categorical field.
fn template(vocab_path: &str) -> Result<PredictRequest, Box<dyn std::error::Error>> {
    let registry = gridcast::persist::load_vocabularies(vocab_path)?;
    let first = |field: CategoricalField| registry.classes_of(field)[0].clone();

    Ok(PredictRequest {
        team: first(CategoricalField::Team),
        driver_surname: first(CategoricalField::DriverSurname),
        driver_forename: first(CategoricalField::DriverForename),
        circuit: first(CategoricalField::Circuit),
        car_number: first(CategoricalField::CarNumber),
        grid_position: 5,
        round: 1,
        driver_age: 25,
        driver_prior_races: 20,
        team_prior_races: 50,
        driver_avg_finish: 10.0,
        team_avg_finish: 8.0,
        driver_track_avg_finish: 10.0,
        team_track_avg_finish: 10.0,
        driver_home_race: false,
        team_home_race: false,
    })
}

fn gauge(probability: f32) -> String {
    const WIDTH: usize = 20;
    let filled = (probability * WIDTH as f32).round() as usize;
    let filled = filled.min(WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(WIDTH - filled))
}

fn print_result(result: &PredictionResult) {
    if result.outcome().is_top_ten() {
        println!("The driver is predicted to finish in the top 10.");
    } else {
        println!("The driver is predicted to finish outside the top 10.");
    }
    println!(
        "Probability of a top-10 finish: {:.2}%",
        result.probability_percent()
    );
    println!("Confidence band: {}", result.band());
    println!("{}", gauge(result.probability()));
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;

    let vocab = args.vocab.ok_or("--vocab is required")?;
    if args.template {
        let request = template(&vocab)?;
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    let model = args.model.ok_or("--model is required")?;
    let input = args.input.ok_or("--input is required")?;

    let ctx = PredictContext::load(&model, &vocab)?;
    let request: PredictRequest = serde_json::from_str(&fs::read_to_string(&input)?)?;

    let vector = FeatureVectorBuilder::new()
        .car_number_code(ctx.encode(CategoricalField::CarNumber, &request.car_number)?)
        .team_prior_races(request.team_prior_races)
        .driver_avg_finish(request.driver_avg_finish)
        .driver_prior_races(request.driver_prior_races)
        .team_avg_finish(request.team_avg_finish)
        .team_track_avg_finish(request.team_track_avg_finish)
        .driver_track_avg_finish(request.driver_track_avg_finish)
        .grid_position(request.grid_position)
        .team_code(ctx.encode(CategoricalField::Team, &request.team)?)
        .surname_code(ctx.encode(CategoricalField::DriverSurname, &request.driver_surname)?)
        .round(request.round)
        .circuit_code(ctx.encode(CategoricalField::Circuit, &request.circuit)?)
        .driver_age(request.driver_age)
        .driver_home_race(request.driver_home_race)
        .team_home_race(request.team_home_race)
        .forename_code(ctx.encode(CategoricalField::DriverForename, &request.driver_forename)?)
        .build()?;

    let result = ctx.predict(&vector)?;
    print_result(&result);
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
