use anyhow::Result;
use colored::*;
use serde_json::{json, Value};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🅿️ Parking Checkpoint Kiosk".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    // Paso 1: Pedir la URL del checkpoint
    let base_url = get_checkpoint_url()?;
    let client = reqwest::Client::new();

    // Paso 2: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🔍 Escanear ticket (escáner de mano / teclado)");
        println!("2. 🚗 Register Entry");
        println!("3. 🏁 Disable Booking");
        println!("4. 📄 Ver estado del checkpoint");
        println!("5. 🔄 Reiniciar pantalla");
        println!("6. 🚪 Salir");
        print!("{}", "Selecciona una opción (1-6): ".bright_yellow());
        io::stdout().flush()?;

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;

        let result = match choice.trim() {
            "1" => {
                let ticket = prompt("Ticket: ")?;
                post(&client, &base_url, "/api/checkpoint/scan", json!({ "ticket": ticket })).await
            }
            "2" => post(&client, &base_url, "/api/checkpoint/entry", json!({})).await,
            "3" => post(&client, &base_url, "/api/checkpoint/exit", json!({})).await,
            "4" => get(&client, &base_url, "/api/checkpoint").await,
            "5" => post(&client, &base_url, "/api/checkpoint/reset", json!({})).await,
            "6" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                continue;
            }
        };

        match result {
            Ok(body) => print_checkpoint(&body),
            Err(e) => println!("{}", format!("❌ Error de red: {}", e).bright_red()),
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

fn get_checkpoint_url() -> Result<String> {
    println!("{}", "🔗 CHECKPOINT".bright_cyan().bold());
    println!("{}", "=============".bright_cyan());

    let url = prompt("URL (ej: http://localhost:3000): ")?;
    let url = if url.is_empty() {
        "http://localhost:3000".to_string()
    } else {
        url.trim_end_matches('/').to_string()
    };
    Ok(url)
}

async fn post(client: &reqwest::Client, base_url: &str, path: &str, body: Value) -> Result<Value> {
    let response = client
        .post(format!("{}{}", base_url, path))
        .json(&body)
        .send()
        .await?;
    Ok(response.json().await?)
}

async fn get(client: &reqwest::Client, base_url: &str, path: &str) -> Result<Value> {
    let response = client.get(format!("{}{}", base_url, path)).send().await?;
    Ok(response.json().await?)
}

fn print_checkpoint(body: &Value) {
    println!();

    if let Some(alert) = body.get("alert").filter(|a| !a.is_null()) {
        let title = alert["title"].as_str().unwrap_or_default();
        let text = alert["text"].as_str().unwrap_or_default();
        let line = format!("{} {}", title, text);
        match alert["icon"].as_str() {
            Some("success") => println!("{}", format!("✅ {}", line).bright_green().bold()),
            Some("error") => println!("{}", format!("❌ {}", line).bright_red().bold()),
            _ => println!("{}", format!("ℹ️ {}", line).bright_blue()),
        }
        println!("{}", "(Enter para continuar)".dimmed());
        let mut ack = String::new();
        let _ = io::stdin().read_line(&mut ack);
    }

    if let Some(state) = body["state"].as_str() {
        println!("{} {}", "📍 Estado:".bright_blue(), state);
    }

    let booking = &body["booking"];
    if booking.is_object() {
        println!("{}", "🎫 Booking Details".bright_cyan().bold());
        println!("   Booking ID:     {}", booking["booking_id"].as_str().unwrap_or("-"));
        println!("   User Name:      {}", booking["user_name"].as_str().unwrap_or("-"));
        println!("   Vehicle Number: {}", booking["vehicle_number"].as_str().unwrap_or("-"));
        println!("   Booked Time:    {}", booking["booked_time"].as_str().unwrap_or("-"));
    }

    if let Some(label) = body["action"]["label"].as_str() {
        println!("{} {}", "👉 Acción disponible:".bright_yellow(), label);
    }

    let bill = &body["bill"];
    if bill.is_object() {
        println!("{}", "🧾 Bill Details".bright_green().bold());
        println!("   User Name:         {}", bill["user_name"].as_str().unwrap_or("-"));
        println!("   Arrival Time:      {}", bill["arrival_time"].as_str().unwrap_or("-"));
        println!("   Departure Time:    {}", bill["departure_time"].as_str().unwrap_or("-"));
        println!("   Amount to be Paid: {}", bill["amount"].as_str().unwrap_or("-"));
    }

    if !booking.is_object() && !bill.is_object() && body.get("state").is_some() {
        println!("{}", "No booking details available.".dimmed());
    }
}
