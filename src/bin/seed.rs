use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use restaurant_ordering_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    let pool = create_pool(&config.database_url).await?;

    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".into());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into());
    let admin_id = ensure_admin(&pool, &email, &password).await?;
    seed_categories(&pool).await?;
    seed_products(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}");
    Ok(())
}

async fn ensure_admin(pool: &sqlx::PgPool, email: &str, password: &str) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, role)
        VALUES ($1, $2, $3, 'admin')
        ON CONFLICT (email) DO UPDATE SET role = 'admin'
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    println!("Ensured admin {email}");
    Ok(user_id)
}

const CATEGORIES: [&str; 3] = ["Burgers", "Sides", "Drinks"];

async fn seed_categories(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    for name in CATEGORIES {
        sqlx::query("INSERT INTO categories (id, name) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING")
            .bind(Uuid::new_v4())
            .bind(name)
            .execute(pool)
            .await?;
    }
    println!("Seeded categories");
    Ok(())
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let (existing,): (i64,) = sqlx::query_as("SELECT count(*) FROM products")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        println!("Products already present, skipping");
        return Ok(());
    }

    let products = [
        ("Classic Burger", "Beef patty, cheddar, pickles", 2550, "Burgers"),
        ("Veggie Burger", "Chickpea patty, tomato, lettuce", 2300, "Burgers"),
        ("Fries", "Crispy, lightly salted", 1200, "Sides"),
        ("Onion Rings", "Beer-battered", 1400, "Sides"),
        ("Cola", "350ml can", 550, "Drinks"),
        ("Lemonade", "Fresh squeezed", 700, "Drinks"),
        ("Iced Tea", "Peach", 650, "Drinks"),
    ];

    for (name, desc, price, category) in products {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, category, active)
            VALUES ($1, $2, $3, $4, $5, TRUE)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(desc)
        .bind(price as i64)
        .bind(category)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
