//! Generate a deterministic sample reviews CSV for manual testing:
//! `cargo run --bin generate_sample`

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[(self.next_u64() % options.len() as u64) as usize]
    }
}

/// Rating on a 1–5 scale drifting upwards over the years, occasionally
/// missing (empty cell).
fn rating(rng: &mut SimpleRng, base: f64, year: i32, missing_rate: f64) -> String {
    if rng.next_f64() < missing_rate {
        return String::new();
    }
    let drift = (year - 2008) as f64 * 0.03;
    let value = (rng.gauss(base + drift, 0.8)).clamp(1.0, 5.0);
    format!("{}", value.round() as i64)
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let countries = ["USA", "India"];
    let positions = [
        "Software Engineer",
        "Warehouse Associate",
        "Operations Manager",
        "Data Analyst",
        "HR Specialist",
    ];
    let pros_pool = [
        "great pay and benefits",
        "good team and smart colleagues",
        "strong career opportunities",
        "interesting work environment",
        "excellent compensation",
    ];
    let cons_pool = [
        "long hours and little work life balance",
        "demanding managers and high pressure",
        "work intensity is exhausting",
        "short breaks during long shifts",
        "management communication could improve",
    ];
    let advice_pool = [
        "give managers better training",
        "respect personal time of the team",
        "improve workload distribution",
        "listen to employee feedback more often",
    ];
    let comment_pool = [
        "overall a career accelerator",
        "mixed experience but learned a lot",
        "would rejoin for the right role",
        "growth comes at a personal cost",
    ];
    let approvals = ["yes", "no", "may be"];
    let recommendations = ["yes", "no"];
    let outlooks = ["positive", "negative", "neutral"];

    let mut writer = csv::Writer::from_path("sample_reviews.csv")
        .expect("Failed to create sample_reviews.csv");
    writer
        .write_record([
            "ID number",
            "Date",
            "Location",
            "Position",
            "Comment for company",
            "Overall Rating",
            "Work-Life Balance",
            "Culture & Values",
            "Career Opportunities",
            "Compensation & Benefits",
            "Senior Management",
            "CEO Approval",
            "Recommended",
            "Business Outlook",
            "Current employee",
            "pros",
            "cons",
            "advice to Management",
        ])
        .expect("Failed to write header");

    let mut id = 0i64;
    for year in 2008..=2020 {
        for &country in &countries {
            let reviews_this_year = 15 + (rng.next_u64() % 10) as usize;
            for _ in 0..reviews_this_year {
                id += 1;
                let month = 1 + rng.next_u64() % 12;
                let day = 1 + rng.next_u64() % 28;
                writer
                    .write_record([
                        id.to_string(),
                        format!("{day:02}-{month:02}-{year}"),
                        country.to_string(),
                        rng.pick(&positions).to_string(),
                        rng.pick(&comment_pool).to_string(),
                        rating(&mut rng, 3.3, year, 0.02),
                        rating(&mut rng, 2.9, year, 0.05),
                        rating(&mut rng, 3.2, year, 0.10),
                        rating(&mut rng, 3.4, year, 0.05),
                        rating(&mut rng, 3.5, year, 0.05),
                        rating(&mut rng, 3.0, year, 0.08),
                        rng.pick(&approvals).to_string(),
                        rng.pick(&recommendations).to_string(),
                        rng.pick(&outlooks).to_string(),
                        (rng.next_f64() < 0.6).to_string(),
                        rng.pick(&pros_pool).to_string(),
                        rng.pick(&cons_pool).to_string(),
                        rng.pick(&advice_pool).to_string(),
                    ])
                    .expect("Failed to write row");
            }
        }
    }

    writer.flush().expect("Failed to flush CSV");
    println!("Wrote {id} reviews to sample_reviews.csv");
}
