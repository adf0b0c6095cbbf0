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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let years = [2022i32, 2023, 2024, 2025];
    let roles: [(&str, f64); 8] = [
        ("Data Scientist", 120_000.0),
        ("Data Engineer", 115_000.0),
        ("Machine Learning Engineer", 135_000.0),
        ("Data Analyst", 80_000.0),
        ("Analytics Engineer", 105_000.0),
        ("Research Scientist", 140_000.0),
        ("BI Analyst", 75_000.0),
        ("Data Architect", 150_000.0),
    ];
    let seniorities: [(&str, f64); 4] = [
        ("junior", 0.6),
        ("mid-level", 0.85),
        ("senior", 1.15),
        ("executive", 1.6),
    ];
    let contracts = ["full-time", "part-time", "contract", "freelance"];
    let sizes = ["small", "medium", "large"];
    let remote_statuses = ["remote", "hybrid", "on-site"];
    let countries: [(&str, f64); 10] = [
        ("USA", 1.25),
        ("CAN", 1.0),
        ("GBR", 0.95),
        ("DEU", 0.9),
        ("FRA", 0.85),
        ("ESP", 0.7),
        ("PRT", 0.6),
        ("BRA", 0.45),
        ("IND", 0.4),
        ("AUS", 1.05),
    ];

    let output_path = "sample_salaries.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    // Header uses the survey export's column names; the loader maps them.
    writer
        .write_record([
            "ano",
            "senioridade",
            "contrato",
            "tamanho_empresa",
            "cargo",
            "remoto",
            "residencia_iso3",
            "usd",
        ])
        .expect("Failed to write header");

    let mut rows: u64 = 0;
    for &year in &years {
        for &(role, base) in &roles {
            for &(seniority, factor) in &seniorities {
                // A handful of respondents per (year, role, seniority) cell.
                let respondents = 3 + (rng.next_u64() % 4);
                for _ in 0..respondents {
                    let &(country, cost) = rng.pick(&countries);
                    let contract = *rng.pick(&contracts);
                    let size = *rng.pick(&sizes);
                    let remote = *rng.pick(&remote_statuses);

                    // Salaries drift up a little year over year.
                    let drift = 1.0 + 0.03 * (year - years[0]) as f64;
                    let salary = rng
                        .gauss(base * factor * cost * drift, base * 0.08)
                        .max(1_000.0);

                    writer
                        .write_record([
                            year.to_string(),
                            seniority.to_string(),
                            contract.to_string(),
                            size.to_string(),
                            role.to_string(),
                            remote.to_string(),
                            country.to_string(),
                            format!("{salary:.2}"),
                        ])
                        .expect("Failed to write row");
                    rows += 1;
                }
            }
        }
    }

    writer.flush().expect("Failed to flush output file");
    println!("Wrote {rows} salary records to {output_path}");
}
