use std::time::Duration;

use colored::*;
use lansight_common::model::DeviceRecord;

const TOTAL_WIDTH: usize = 64;
const KEY_WIDTH: usize = 7;

pub fn header(msg: &str) {
    let formatted = format!("⟦ {} ⟧", msg);
    let msg_len = formatted.chars().count();

    let dash_count = TOTAL_WIDTH.saturating_sub(msg_len);
    let left = dash_count / 2;
    let right = dash_count - left;

    let line = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    println!("{line}");
}

pub fn devices(devices: &[DeviceRecord]) {
    if devices.is_empty() {
        println!("{}", "No live hosts detected.".red().bold());
        return;
    }

    let mut sorted: Vec<&DeviceRecord> = devices.iter().collect();
    sorted.sort_by_key(|d| d.ip);

    for (idx, &device) in sorted.iter().enumerate() {
        tree_head(idx, device);
        print_details(device);
        if idx + 1 != sorted.len() {
            println!();
        }
    }
}

pub fn summary(count: usize, total_time: Duration) {
    let hosts = format!("{count} device(s)").bold().green();
    let elapsed = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    println!("{}", "═".repeat(TOTAL_WIDTH).bright_black());
    println!("Scan complete: {hosts} identified in {elapsed}");
}

fn tree_head(idx: usize, device: &DeviceRecord) {
    let marker = if device.is_self { " (this host)" } else { "" };
    println!(
        "{} {} {}{}",
        format!("[{idx}]").bright_black(),
        device.ip.to_string().cyan(),
        device.device_type.to_string().bright_green(),
        marker.bright_black(),
    );
}

fn print_details(device: &DeviceRecord) {
    let ports = if device.open_ports.is_empty() {
        "none".to_string()
    } else {
        device
            .open_ports
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let details: Vec<(&str, String)> = vec![
        ("MAC", device.mac.clone()),
        ("Vendor", device.vendor.clone()),
        ("Ports", ports),
        ("Banner", device.banner.clone()),
        ("Latency", format!("{} ms", device.latency)),
    ];

    for (i, (key, value)) in details.iter().enumerate() {
        let branch = if i + 1 != details.len() {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        let padding = ".".repeat(KEY_WIDTH.saturating_sub(key.len()));
        println!(
            " {} {}{}{} {}",
            branch,
            key,
            padding.bright_black(),
            ":".bright_black(),
            value
        );
    }
}
