use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const INDEXES: [&str; 10] = [
    "CREATE INDEX IF NOT EXISTS idx_fitness_classes_room_id ON fitness_classes(room_id)",
    "CREATE INDEX IF NOT EXISTS idx_fitness_classes_trainer_id ON fitness_classes(trainer_id)",
    "CREATE INDEX IF NOT EXISTS idx_fitness_classes_start_time ON fitness_classes(start_time)",
    "CREATE INDEX IF NOT EXISTS idx_member_schedule_member_id ON member_schedule(member_id)",
    "CREATE INDEX IF NOT EXISTS idx_member_schedule_class_id ON member_schedule(class_id)",
    "CREATE INDEX IF NOT EXISTS idx_member_schedule_trainer_id ON member_schedule(trainer_id)",
    "CREATE INDEX IF NOT EXISTS idx_trainer_unavailability_trainer_id ON trainer_unavailability(trainer_id)",
    "CREATE INDEX IF NOT EXISTS idx_equipment_maintenance_start_time ON equipment_maintenance(start_time)",
    "CREATE INDEX IF NOT EXISTS idx_fitness_goals_member_id ON fitness_goals(member_id)",
    "CREATE INDEX IF NOT EXISTS idx_health_metrics_member_id ON health_metrics(member_id)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Needed for uuid equality inside the room exclusion constraint
    sqlx::query("CREATE EXTENSION IF NOT EXISTS btree_gist")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rooms (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS members (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            first_name VARCHAR(255) NOT NULL,
            last_name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS trainers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            first_name VARCHAR(255) NOT NULL,
            last_name VARCHAR(255) NOT NULL,
            specialization VARCHAR(32) NOT NULL,
            credentials TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Live classes may not share a room over overlapping [start, end) ranges
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fitness_classes (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            activity VARCHAR(32) NOT NULL,
            room_id UUID NOT NULL REFERENCES rooms(id),
            trainer_id UUID NOT NULL REFERENCES trainers(id),
            start_time TIMESTAMP NOT NULL,
            end_time TIMESTAMP NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'Scheduled',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_class_range CHECK (end_time > start_time),
            CONSTRAINT no_room_double_booking EXCLUDE USING gist (
                room_id WITH =,
                tsrange(start_time, end_time) WITH &&
            ) WHERE (status <> 'Cancelled')
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS member_schedule (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            member_id UUID NOT NULL REFERENCES members(id),
            class_id UUID NULL REFERENCES fitness_classes(id),
            trainer_id UUID NULL REFERENCES trainers(id),
            start_time TIMESTAMP NULL,
            end_time TIMESTAMP NULL,
            session_type VARCHAR(32) NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'Scheduled',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_session_range CHECK (end_time IS NULL OR end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS trainer_unavailability (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            trainer_id UUID NOT NULL REFERENCES trainers(id),
            start_time TIMESTAMP NOT NULL,
            end_time TIMESTAMP NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_unavailability_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS equipment_maintenance (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            start_time TIMESTAMP NOT NULL,
            end_time TIMESTAMP NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'Scheduled',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_maintenance_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS payments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            member_id UUID NOT NULL REFERENCES members(id),
            amount DOUBLE PRECISION NOT NULL,
            service VARCHAR(255) NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'Unprocessed',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fitness_goals (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            member_id UUID NOT NULL REFERENCES members(id),
            goal_type VARCHAR(255) NOT NULL,
            target_value VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS health_metrics (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            member_id UUID NOT NULL REFERENCES members(id),
            metric_type VARCHAR(255) NOT NULL,
            metric_value VARCHAR(255) NOT NULL,
            recorded_on DATE NOT NULL DEFAULT CURRENT_DATE
        );
        "#,
    )
    .execute(pool)
    .await?;

    for statement in INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
