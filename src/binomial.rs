//! Factorials, binomial coefficients and the binomial distribution.

use super::*;
use rand::Rng;
use rand_distr::Distribution;
use statrs::function::factorial::ln_binomial;
use std::io::Write;

/// Largest `k` with `k!` representable in a `u64`.
pub const MAX_FACTORIAL: u64 = 20;

/// Computes `k!` iteratively.
///
/// Fails with [`Error::FactorialOverflow`] for `k > 20`; use
/// `statrs::function::factorial::ln_factorial` beyond that.
pub fn factorial(k: u64) -> Result<u64> {
    (2..=k).try_fold(1u64, |acc, i| {
        acc.checked_mul(i).ok_or(Error::FactorialOverflow(k))
    })
}

/// Binomial coefficient `a choose b`.
///
/// Multiplicative formula over `min(b, a - b)` factors in `u128`; every
/// intermediate is itself a binomial coefficient, so the division is exact.
/// The result is exact below 2^53. Beyond the `u128` range it is taken from
/// `ln_binomial`.
///
/// # Example
/// ```
/// use rust_compstat::binomial::choose;
/// assert_eq!(choose(10, 3).unwrap(), 120.0);
/// assert_eq!(choose(10, 7).unwrap(), 120.0);
/// ```
pub fn choose(a: u64, b: u64) -> Result<f64> {
    check_choose(a, b)?;

    let b = b.min(a - b);
    let exact = (1..=b).try_fold(1u128, |acc, i| {
        acc.checked_mul((a - b + i) as u128).map(|x| x / i as u128)
    });

    Ok(match exact {
        Some(coefficient) => coefficient as f64,
        None => ln_binomial(a, b).exp(),
    })
}

/// Natural logarithm of `a choose b`, finite for all valid arguments.
pub fn ln_choose(a: u64, b: u64) -> Result<f64> {
    check_choose(a, b)?;
    Ok(ln_binomial(a, b))
}

fn check_choose(a: u64, b: u64) -> Result<()> {
    if b > a {
        return Err(Error::invalid(
            "b",
            format!("cannot choose {} out of {}", b, a),
        ));
    }
    Ok(())
}

/// Binomial distribution with `n` trials and success probability `p`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Binom {
    n: u64,
    p: f64,
}

impl Binom {
    pub fn new(n: u64, p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::invalid(
                "p",
                format!("{} is not a probability", p),
            ));
        }
        Ok(Self { n, p })
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    /// Probability of exactly `k` successes.
    ///
    /// # Example
    /// ```
    /// use rust_compstat::binomial::Binom;
    /// let b = Binom::new(10, 0.5).unwrap();
    /// assert!((b.dbinom(5).unwrap() - 0.24609375).abs() < 1e-12);
    /// ```
    pub fn dbinom(&self, k: u64) -> Result<f64> {
        self.check_k(k)?;
        let failures = self.n - k;

        if self.p == 0.0 {
            return Ok(if k == 0 { 1.0 } else { 0.0 });
        }
        if self.p == 1.0 {
            return Ok(if failures == 0 { 1.0 } else { 0.0 });
        }

        let coefficient = choose(self.n, k)?;
        let successes = self.p.powf(k as f64);
        let misses = (1.0 - self.p).powf(failures as f64);
        let mass = coefficient * successes * misses;

        if [coefficient, successes, misses, mass]
            .iter()
            .all(|f| f.is_normal())
        {
            return Ok(mass);
        }

        // a factor left the normal range
        let ln_mass = ln_binomial(self.n, k)
            + k as f64 * self.p.ln()
            + failures as f64 * (1.0 - self.p).ln();
        Ok(ln_mass.exp())
    }

    /// Probability of at most `k` successes.
    pub fn pbinom(&self, k: u64) -> Result<f64> {
        self.check_k(k)?;
        let mut cumulative = 0.0;
        for i in 0..=k {
            cumulative += self.dbinom(i)?;
        }
        Ok(cumulative.min(1.0))
    }

    pub fn mean(&self) -> f64 {
        self.n as f64 * self.p
    }

    pub fn variance(&self) -> f64 {
        self.n as f64 * self.p * (1.0 - self.p)
    }

    /// Draws the number of successes in `n` trials.
    pub fn sample(&self, rng: &mut impl Rng) -> Result<u64> {
        let distr = rand_distr::Binomial::new(self.n, self.p)
            .map_err(|e| Error::invalid("p", e.to_string()))?;
        Ok(distr.sample(rng))
    }

    /// One line of the form `P(Y=5 ; n=10, p=0.50) = 0.2461`.
    pub fn describe(&self, k: u64) -> Result<String> {
        Ok(format!(
            "P(Y={:<2}; n={}, p={:.2}) = {:.4}",
            k,
            self.n,
            self.p,
            self.dbinom(k)?
        ))
    }

    pub fn write_pmf(&self, k: u64, writer: &mut impl Write) -> Result<()> {
        writeln!(writer, "{}", self.describe(k)?)?;
        Ok(())
    }

    /// Prints [`Binom::describe`] to stdout.
    pub fn print(&self, k: u64) -> Result<()> {
        self.write_pmf(k, &mut std::io::stdout().lock())
    }

    fn check_k(&self, k: u64) -> Result<()> {
        if k > self.n {
            return Err(Error::invalid(
                "k",
                format!("{} successes out of {} trials", k, self.n),
            ));
        }
        Ok(())
    }
}

/// Writes factorials, coefficients and the probability mass table of `binom`.
pub fn write_report(binom: &Binom, writer: &mut impl Write) -> Result<()> {
    let n = binom.n();

    writeln!(writer, "Factorials")?;
    for k in 1..=n {
        match factorial(k) {
            Ok(value) => writeln!(writer, "{}", value)?,
            Err(Error::FactorialOverflow(_)) => writeln!(
                writer,
                "{:.6e}",
                statrs::function::factorial::factorial(k)
            )?,
            Err(e) => return Err(e),
        }
    }

    writeln!(writer, "Choose")?;
    for k in 1..=n {
        writeln!(writer, "{}", choose(n, k)?)?;
    }

    writeln!(writer, "Probability mass")?;
    for k in 0..=n {
        writeln!(writer, "{}", binom.dbinom(k)?)?;
    }

    writeln!(writer, "Table")?;
    for k in 0..=n {
        binom.write_pmf(k, writer)?;
    }

    Ok(())
}
