//! Initial database migration.
//!
//! Creates the users, sessions and calculations tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(FUNCTIONS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(SESSIONS_SQL).await?;
        db.execute_unprepared(CALCULATIONS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const FUNCTIONS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    full_name VARCHAR(255) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_users_email ON users(email) WHERE is_active = true;

CREATE TRIGGER trg_users_updated_at
    BEFORE UPDATE ON users
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const SESSIONS_SQL: &str = r"
CREATE TABLE sessions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    refresh_token_hash VARCHAR(64) NOT NULL,
    user_agent TEXT,
    expires_at TIMESTAMPTZ NOT NULL,
    revoked_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_expires_future CHECK (expires_at > created_at)
);

-- Token lookup is the hot path
CREATE INDEX idx_sessions_token_hash ON sessions(refresh_token_hash) WHERE revoked_at IS NULL;
CREATE INDEX idx_sessions_user ON sessions(user_id, created_at DESC) WHERE revoked_at IS NULL;
CREATE INDEX idx_sessions_expires ON sessions(expires_at) WHERE revoked_at IS NULL;
";

const CALCULATIONS_SQL: &str = r"
CREATE TABLE calculations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    person_a_name VARCHAR(255) NOT NULL,
    person_b_name VARCHAR(255) NOT NULL,
    person_a_income NUMERIC NOT NULL,
    person_b_income NUMERIC NOT NULL,
    person_a_currency VARCHAR(3) NOT NULL,
    person_b_currency VARCHAR(3) NOT NULL,
    total_bill NUMERIC NOT NULL,
    bill_currency VARCHAR(3) NOT NULL,
    person_a_payment NUMERIC NOT NULL,
    person_b_payment NUMERIC NOT NULL,
    person_a_percentage NUMERIC NOT NULL,
    person_b_percentage NUMERIC NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_incomes_positive CHECK (person_a_income > 0 AND person_b_income > 0),
    CONSTRAINT chk_bill_positive CHECK (total_bill > 0),
    CONSTRAINT chk_payments_non_negative CHECK (person_a_payment >= 0 AND person_b_payment >= 0),
    CONSTRAINT chk_currencies CHECK (
        person_a_currency IN ('ARS', 'USD', 'EUR', 'BRL', 'CLP', 'UYU')
        AND person_b_currency IN ('ARS', 'USD', 'EUR', 'BRL', 'CLP', 'UYU')
        AND bill_currency IN ('ARS', 'USD', 'EUR', 'BRL', 'CLP', 'UYU')
    )
);

-- History listing is newest first per owner
CREATE INDEX idx_calculations_user_created ON calculations(user_id, created_at DESC);

CREATE TRIGGER trg_calculations_updated_at
    BEFORE UPDATE ON calculations
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS calculations CASCADE;
DROP TABLE IF EXISTS sessions CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP FUNCTION IF EXISTS set_updated_at();
";
