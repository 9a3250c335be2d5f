use anyhow::Context;
use clap::Parser;
use storage::Database;
use storage::dto::exercise::CreateExerciseRequest;
use storage::repository::category::CategoryRepository;
use storage::repository::exercise::ExerciseRepository;
use storage::repository::muscle_group::MuscleGroupRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Workout catalog seeder", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(short, long)]
    verbose: bool,
}

struct SeedExercise {
    name: &'static str,
    category: &'static str,
    muscle_group: &'static str,
}

const CATEGORIES: &[&str] = &["Strength", "Cardio", "Mobility", "Bodyweight"];

const MUSCLE_GROUPS: &[&str] = &[
    "Legs", "Back", "Chest", "Shoulders", "Arms", "Core", "Full Body",
];

const DEFAULT_EXERCISES: &[SeedExercise] = &[
    SeedExercise {
        name: "Squat",
        category: "Strength",
        muscle_group: "Legs",
    },
    SeedExercise {
        name: "Deadlift",
        category: "Strength",
        muscle_group: "Back",
    },
    SeedExercise {
        name: "Bench Press",
        category: "Strength",
        muscle_group: "Chest",
    },
    SeedExercise {
        name: "Overhead Press",
        category: "Strength",
        muscle_group: "Shoulders",
    },
    SeedExercise {
        name: "Barbell Row",
        category: "Strength",
        muscle_group: "Back",
    },
    SeedExercise {
        name: "Lunge",
        category: "Strength",
        muscle_group: "Legs",
    },
    SeedExercise {
        name: "Bicep Curl",
        category: "Strength",
        muscle_group: "Arms",
    },
    SeedExercise {
        name: "Pull Up",
        category: "Bodyweight",
        muscle_group: "Back",
    },
    SeedExercise {
        name: "Push Up",
        category: "Bodyweight",
        muscle_group: "Chest",
    },
    SeedExercise {
        name: "Dip",
        category: "Bodyweight",
        muscle_group: "Arms",
    },
    SeedExercise {
        name: "Plank",
        category: "Bodyweight",
        muscle_group: "Core",
    },
    SeedExercise {
        name: "Running",
        category: "Cardio",
        muscle_group: "Full Body",
    },
    SeedExercise {
        name: "Rowing",
        category: "Cardio",
        muscle_group: "Full Body",
    },
    SeedExercise {
        name: "Hip Hinge Stretch",
        category: "Mobility",
        muscle_group: "Legs",
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("seeder={log_level},storage={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = Database::new(&cli.database_url)
        .await
        .context("Failed to initialize database")?;
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;

    seed(&db).await
}

/// Import the default catalog. Every row goes through find-or-create by
/// name, so re-running the seeder never duplicates anything.
async fn seed(db: &Database) -> anyhow::Result<()> {
    let pool = db.pool();

    let categories = CategoryRepository::new(pool);
    for name in CATEGORIES {
        let category = categories
            .find_or_create(name)
            .await
            .with_context(|| format!("Failed to seed category '{name}'"))?;
        tracing::debug!(id = %category.category_id, name, "category ready");
    }
    tracing::info!("Seeded {} categories", CATEGORIES.len());

    let muscle_groups = MuscleGroupRepository::new(pool);
    for name in MUSCLE_GROUPS {
        let group = muscle_groups
            .find_or_create(name)
            .await
            .with_context(|| format!("Failed to seed muscle group '{name}'"))?;
        tracing::debug!(id = %group.muscle_group_id, name, "muscle group ready");
    }
    tracing::info!("Seeded {} muscle groups", MUSCLE_GROUPS.len());

    let exercises = ExerciseRepository::new(pool);
    for seed in DEFAULT_EXERCISES {
        let category = categories
            .find_or_create(seed.category)
            .await
            .with_context(|| format!("Failed to resolve category '{}'", seed.category))?;
        let muscle_group = muscle_groups
            .find_or_create(seed.muscle_group)
            .await
            .with_context(|| format!("Failed to resolve muscle group '{}'", seed.muscle_group))?;

        let exercise = exercises
            .create(&CreateExerciseRequest {
                name: seed.name.to_string(),
                category_id: category.category_id,
                muscle_group_id: muscle_group.muscle_group_id,
            })
            .await
            .with_context(|| format!("Failed to seed exercise '{}'", seed.name))?;
        tracing::debug!(id = %exercise.exercise_id, name = seed.name, "exercise ready");
    }
    tracing::info!("Seeded {} exercises", DEFAULT_EXERCISES.len());

    Ok(())
}
