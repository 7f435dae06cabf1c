use care_core::{
    Applicant, ApplicantInput, CoreConfig, PatientService, Predictor, SortField, SortOrder,
    StoredPatient, MODEL_VERSION,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "care")]
#[command(about = "Patient store and premium predictor CLI")]
struct Cli {
    /// Patient JSON file (defaults to CARE_PATIENT_FILE or patients.json)
    #[arg(long, global = true)]
    patient_file: Option<PathBuf>,
    /// Model artifact (defaults to CARE_MODEL_PATH or model/model.json)
    #[arg(long, global = true)]
    model: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    List,
    /// Show one patient
    Show {
        /// Patient id
        id: String,
    },
    /// List patients sorted by height, weight or bmi
    Sort {
        /// height, weight or bmi
        field: String,
        /// asc or desc
        #[arg(long, default_value = "asc")]
        order: String,
    },
    /// Delete a patient
    Delete {
        /// Patient id
        id: String,
    },
    /// Predict the premium category for an applicant
    Predict {
        #[arg(long)]
        age: i64,
        /// Height in metres
        #[arg(long)]
        height: f64,
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        city: String,
        #[arg(long)]
        income_lpa: i64,
        #[arg(long)]
        smoker: bool,
        #[arg(long)]
        occupation: String,
    },
}

fn print_patient(id: &str, p: &StoredPatient) {
    println!(
        "ID: {}, Name: {}, City: {}, Age: {}, Gender: {}, Height: {}, Weight: {}, BMI: {}, Verdict: {:?}",
        id,
        p.name,
        p.city,
        p.age,
        p.gender.as_str(),
        p.height,
        p.weight,
        p.bmi,
        p.verdict
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let patient_file = cli
        .patient_file
        .map(|p| p.display().to_string())
        .or_else(|| std::env::var("CARE_PATIENT_FILE").ok());
    let model = cli
        .model
        .map(|p| p.display().to_string())
        .or_else(|| std::env::var("CARE_MODEL_PATH").ok());
    let cfg = CoreConfig::from_env_values(patient_file, model)?;

    match cli.command {
        Some(Commands::List) => {
            let patients = PatientService::from_config(&cfg).get_all()?;
            if patients.is_empty() {
                println!("No patients found.");
            } else {
                for (id, patient) in &patients {
                    print_patient(id, patient);
                }
            }
        }
        Some(Commands::Show { id }) => match PatientService::from_config(&cfg).get(&id) {
            Ok(patient) => print_patient(&id, &patient),
            Err(e) => eprintln!("Error showing patient: {}", e),
        },
        Some(Commands::Sort { field, order }) => {
            let sorted = SortField::parse(&field).and_then(|field| {
                let order = SortOrder::parse(&order)?;
                PatientService::from_config(&cfg).sorted(field, order)
            });
            match sorted {
                Ok(patients) => {
                    for (id, patient) in &patients {
                        print_patient(id, patient);
                    }
                }
                Err(e) => eprintln!("Error sorting patients: {}", e),
            }
        }
        Some(Commands::Delete { id }) => match PatientService::from_config(&cfg).delete(&id) {
            Ok(()) => println!("Deleted patient: {}", id),
            Err(e) => eprintln!("Error deleting patient: {}", e),
        },
        Some(Commands::Predict {
            age,
            height,
            weight,
            city,
            income_lpa,
            smoker,
            occupation,
        }) => {
            let applicant = Applicant::new(ApplicantInput {
                age,
                height,
                weight,
                city,
                income_lpa,
                smoker,
                occupation,
            })?;
            let predictor = Predictor::load(cfg.model_path(), MODEL_VERSION)?;
            let prediction = predictor.predict(&applicant.features())?;
            println!("{}", serde_json::to_string_pretty(&prediction)?);
        }
        None => {
            println!("Use 'care --help' for commands");
        }
    }

    Ok(())
}
