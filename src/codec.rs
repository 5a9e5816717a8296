//! Reed-Solomon encode/decode over a configurable code profile.
//!
//! A [`CodeProfile`] fixes the field, the generator-polynomial roots
//! (`alpha^(fcr + i*prim)` for `i` in `0..nroots`) and the virtual padding
//! that shortens the codeword. Encoding is systematic polynomial division;
//! decoding runs syndromes, Forney syndromes over the declared erasures,
//! Berlekamp-Massey for the remaining unknown errors, a Chien search over
//! the codeword support, and Forney magnitude computation, then re-checks
//! the corrected word before accepting it.
//!
//! Canonical symbol order is `parity ++ message`, each block high-to-low
//! degree. Internally the code works on the polynomial coefficient order
//! `message ++ parity` (index 0 = degree n-1).

use log::{debug, trace};

use crate::gf::GaloisField;
use crate::Error;

/// Outcome of a decode attempt.
///
/// Decode failure is an expected result of noisy input, not an error: the
/// caller branches on it routinely, so it lives in the success type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeResult {
    /// The message was recovered; `corrected` counts the symbols changed
    /// (declared erasures included).
    Corrected { message: Vec<u8>, corrected: usize },
    /// The error pattern exceeds what the parity symbols can resolve.
    Uncorrectable,
}

impl DecodeResult {
    /// Corrected-symbol count, or -1 for an uncorrectable block.
    ///
    /// The negative sentinel matches the legacy calling convention where
    /// callers branch only on sign; new code should match on the enum.
    pub fn error_count(&self) -> i32 {
        match self {
            DecodeResult::Corrected { corrected, .. } => *corrected as i32,
            DecodeResult::Uncorrectable => -1,
        }
    }

    /// The recovered message, if correction succeeded.
    pub fn message(&self) -> Option<&[u8]> {
        match self {
            DecodeResult::Corrected { message, .. } => Some(message),
            DecodeResult::Uncorrectable => None,
        }
    }

    /// Consume the result, yielding the recovered message if any.
    pub fn into_message(self) -> Option<Vec<u8>> {
        match self {
            DecodeResult::Corrected { message, .. } => Some(message),
            DecodeResult::Uncorrectable => None,
        }
    }
}

/// Immutable parameter set for one Reed-Solomon code.
///
/// Holds the field tables and the generator polynomial, both built once at
/// construction; afterwards the profile is read-only and safe to share
/// across threads for any number of encode/decode calls.
#[derive(Debug, Clone)]
pub struct CodeProfile {
    fcr: usize,
    prim: usize,
    nroots: usize,
    pad: usize,
    /// Data symbols per codeword: 2^m - 1 - nroots - pad.
    k: usize,
    /// Transmitted codeword length: k + nroots.
    n: usize,
    gf: GaloisField,
    generator: Vec<u8>,
}

impl CodeProfile {
    /// Build a profile and its derived tables.
    ///
    /// `fcr` is the exponent of the first consecutive generator root,
    /// `prim` the primitive-element step between consecutive roots, and
    /// `pad` the number of virtually padded (unused leading) positions of
    /// the maximal-length codeword, which shortens the transmitted length.
    pub fn new(
        symbol_bits: u32,
        field_poly: u32,
        fcr: usize,
        prim: usize,
        nroots: usize,
        pad: usize,
    ) -> Result<Self, Error> {
        let gf = GaloisField::new(field_poly, symbol_bits)?;
        let max = gf.group_order();

        if nroots == 0 || nroots >= max {
            return Err(Error::BadParityCount { nroots, max });
        }
        if prim == 0 || gcd(prim, max) != 1 {
            return Err(Error::BadRootStep { prim, order: max });
        }
        if pad + nroots >= max {
            return Err(Error::BadPadding { pad, max });
        }

        let k = max - nroots - pad;
        let generator = generator_poly(&gf, fcr, prim, nroots);

        Ok(Self {
            fcr,
            prim,
            nroots,
            pad,
            k,
            n: k + nroots,
            gf,
            generator,
        })
    }

    /// Transmitted codeword length n = k + nroots.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Data symbols per codeword.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Parity symbols per codeword.
    pub fn nroots(&self) -> usize {
        self.nroots
    }

    /// Virtually padded positions of the maximal-length codeword.
    pub fn pad(&self) -> usize {
        self.pad
    }

    /// The field this profile computes in.
    pub fn field(&self) -> &GaloisField {
        &self.gf
    }

    /// Generator polynomial coefficients, high-to-low degree (monic,
    /// length nroots + 1).
    pub fn generator(&self) -> &[u8] {
        &self.generator
    }

    /// Systematic encode: compute the parity block for `message`.
    ///
    /// Returns the `nroots` parity symbols in high-to-low degree order.
    /// The transmitted codeword is `parity ++ message`.
    pub fn encode(&self, message: &[u8]) -> Result<Vec<u8>, Error> {
        if message.len() != self.k {
            return Err(Error::MessageLength {
                got: message.len(),
                want: self.k,
            });
        }
        self.check_symbols(message)?;

        // Divide message(x) * x^nroots by the generator; the remainder is
        // the parity block.
        let mut buf = vec![0u8; self.n];
        buf[..self.k].copy_from_slice(message);
        for i in 0..self.k {
            let coef = buf[i];
            if coef != 0 {
                for j in 1..self.generator.len() {
                    buf[i + j] ^= self.gf.mul(self.generator[j], coef);
                }
            }
        }
        buf.drain(..self.k);
        Ok(buf)
    }

    /// Decode a received codeword with the given erasure positions.
    ///
    /// `codeword` is `parity ++ message` (the canonical order); `erasures`
    /// holds distinct 0-based positions into that layout. Invalid inputs
    /// are rejected with `Err`; a pattern beyond the code's correction
    /// capability decodes to `Ok(DecodeResult::Uncorrectable)`.
    pub fn decode(&self, codeword: &[u8], erasures: &[usize]) -> Result<DecodeResult, Error> {
        if codeword.len() != self.n {
            return Err(Error::CodewordLength {
                got: codeword.len(),
                want: self.n,
            });
        }
        self.check_symbols(codeword)?;
        if erasures.len() > self.nroots {
            return Err(Error::TooManyErasures {
                numera: erasures.len(),
                nroots: self.nroots,
            });
        }
        let mut seen = vec![false; self.n];
        for &pos in erasures {
            if pos >= self.n {
                return Err(Error::ErasureOutOfRange { pos, len: self.n });
            }
            if seen[pos] {
                return Err(Error::DuplicateErasure(pos));
            }
            seen[pos] = true;
        }

        // Rebuild polynomial coefficient order and remap erasures into it.
        let mut poly = Vec::with_capacity(self.n);
        poly.extend_from_slice(&codeword[self.nroots..]);
        poly.extend_from_slice(&codeword[..self.nroots]);
        let era: Vec<usize> = erasures.iter().map(|&p| self.poly_index(p)).collect();

        let synd = self.syndromes(&poly);
        if synd.iter().all(|&s| s == 0) {
            // Clean block: accept unchanged, even if erasures were declared.
            return Ok(DecodeResult::Corrected {
                message: poly[..self.k].to_vec(),
                corrected: 0,
            });
        }

        match self.correct(&poly, &synd, &era) {
            Some((corrected, count)) => {
                trace!(
                    "corrected {count} symbols ({} erasures declared)",
                    era.len()
                );
                Ok(DecodeResult::Corrected {
                    message: corrected[..self.k].to_vec(),
                    corrected: count,
                })
            }
            None => {
                debug!(
                    "uncorrectable block: n={}, nroots={}, {} erasures declared",
                    self.n,
                    self.nroots,
                    era.len()
                );
                Ok(DecodeResult::Uncorrectable)
            }
        }
    }

    /// Canonical codeword position -> polynomial coefficient index.
    fn poly_index(&self, pos: usize) -> usize {
        if pos < self.nroots {
            self.k + pos
        } else {
            pos - self.nroots
        }
    }

    fn check_symbols(&self, symbols: &[u8]) -> Result<(), Error> {
        let order = self.gf.order();
        for &value in symbols {
            if value as usize >= order {
                return Err(Error::SymbolRange { value, order });
            }
        }
        Ok(())
    }

    /// Evaluate the received polynomial at each code root.
    ///
    /// Entry 0 is a padding zero so that the reversed vector is x * S(x),
    /// which the evaluator-construction step relies on.
    fn syndromes(&self, poly: &[u8]) -> Vec<u8> {
        let mut synd = vec![0u8; self.nroots + 1];
        for i in 1..=self.nroots {
            let root = self.gf.alpha_pow((self.fcr + (i - 1) * self.prim) as isize);
            synd[i] = poly_eval(&self.gf, poly, root);
        }
        synd
    }

    /// Full error-and-erasure correction pipeline; `None` means the
    /// pattern is uncorrectable.
    fn correct(&self, poly: &[u8], synd: &[u8], era: &[usize]) -> Option<(Vec<u8>, usize)> {
        // Fold the erasure contributions out of the syndromes so the
        // iterative solver only has to locate the unknown errors.
        let fsynd = self.forney_syndromes(synd, era);
        let err_loc = self.error_locator(&fsynd, era.len())?;

        let reloc: Vec<u8> = err_loc.iter().rev().copied().collect();
        let err_pos = self.error_positions(&reloc)?;

        let mut all_pos = era.to_vec();
        all_pos.extend_from_slice(&err_pos);
        if all_pos.is_empty() {
            // Nonzero syndromes but nothing located.
            return None;
        }

        let corrected = self.correct_errata(poly, synd, &all_pos)?;

        // A miscorrection can satisfy the root count yet leave the word
        // outside the code; reject it here rather than hand back garbage.
        let verify = self.syndromes(&corrected);
        if verify.iter().any(|&s| s != 0) {
            return None;
        }

        Some((corrected, all_pos.len()))
    }

    /// Transform syndromes so erasure terms vanish (Forney syndromes).
    fn forney_syndromes(&self, synd: &[u8], era: &[usize]) -> Vec<u8> {
        let mut fsynd = synd[1..].to_vec();
        for &pos in era {
            let degree = self.n - 1 - pos;
            let x = self.gf.alpha_pow((self.prim * degree) as isize);
            for j in 0..fsynd.len().saturating_sub(1) {
                fsynd[j] = self.gf.mul(fsynd[j], x) ^ fsynd[j + 1];
            }
        }
        fsynd
    }

    /// Berlekamp-Massey over the erasure-free syndromes.
    ///
    /// With `numera` erasures already accounted for, only
    /// `nroots - numera` syndromes remain to locate unknown errors, which
    /// bounds the locator degree at floor((nroots - numera) / 2).
    fn error_locator(&self, fsynd: &[u8], numera: usize) -> Option<Vec<u8>> {
        let mut err_loc = vec![1u8];
        let mut old_loc = vec![1u8];

        for i in 0..(self.nroots - numera) {
            let mut delta = fsynd[i];
            for j in 1..err_loc.len() {
                let idx = err_loc.len() - 1 - j;
                delta ^= self.gf.mul(err_loc[idx], fsynd[i - j]);
            }

            old_loc.push(0);

            if delta != 0 {
                if old_loc.len() > err_loc.len() {
                    let scaled = poly_scale(&self.gf, &old_loc, delta);
                    old_loc = poly_scale(&self.gf, &err_loc, self.gf.inv(delta).ok()?);
                    err_loc = scaled;
                }
                let scaled = poly_scale(&self.gf, &old_loc, delta);
                err_loc = poly_add(&err_loc, &scaled);
            }
        }

        let shift = err_loc.iter().take_while(|&&c| c == 0).count();
        let err_loc = err_loc[shift..].to_vec();

        let errs = err_loc.len() - 1;
        if errs * 2 + numera > self.nroots {
            return None;
        }
        Some(err_loc)
    }

    /// Chien search: probe every position of the codeword support.
    ///
    /// The search never visits the `pad` virtual positions of a shortened
    /// code; a locator root landing there is simply not found, and the
    /// root-count check rejects the pattern.
    fn error_positions(&self, reloc: &[u8]) -> Option<Vec<usize>> {
        let errs = reloc.len() - 1;
        let mut positions = Vec::new();
        for degree in 0..self.n {
            let x = self.gf.alpha_pow((self.prim * degree) as isize);
            if poly_eval(&self.gf, reloc, x) == 0 {
                positions.push(self.n - 1 - degree);
            }
        }
        if positions.len() != errs {
            return None;
        }
        Some(positions)
    }

    /// Locator polynomial over the combined erasure + error positions.
    fn errata_locator(&self, positions: &[usize]) -> Vec<u8> {
        let mut loc = vec![1u8];
        for &pos in positions {
            let degree = self.n - 1 - pos;
            let root = self.gf.alpha_pow((self.prim * degree) as isize);
            loc = poly_mul(&self.gf, &loc, &[root, 1]);
        }
        loc
    }

    /// Error evaluator: (x * S(x) * locator) mod x^(deg+1).
    fn error_evaluator(&self, rsynd: &[u8], errata_loc: &[u8]) -> Vec<u8> {
        let prod = poly_mul(&self.gf, rsynd, errata_loc);
        let mut divisor = vec![0u8; errata_loc.len() + 1];
        divisor[0] = 1;
        poly_rem(&self.gf, &prod, &divisor)
    }

    /// Forney magnitudes: XOR the computed error values into the word.
    fn correct_errata(&self, poly: &[u8], synd: &[u8], positions: &[usize]) -> Option<Vec<u8>> {
        let errata_loc = self.errata_locator(positions);
        let rsynd: Vec<u8> = synd.iter().rev().copied().collect();
        let omega = self.error_evaluator(&rsynd, &errata_loc);

        let degrees: Vec<usize> = positions.iter().map(|&p| self.n - 1 - p).collect();
        let roots: Vec<u8> = degrees
            .iter()
            .map(|&d| self.gf.alpha_pow((self.prim * d) as isize))
            .collect();

        let mut e = vec![0u8; poly.len()];
        for (i, (&xi, &degree)) in roots.iter().zip(&degrees).enumerate() {
            let xi_inv = self.gf.inv(xi).ok()?;

            // Formal derivative of the locator, evaluated at 1/Xi.
            let mut loc_prime = 1u8;
            for (j, &xj) in roots.iter().enumerate() {
                if j != i {
                    loc_prime = self.gf.mul(loc_prime, 1 ^ self.gf.mul(xi_inv, xj));
                }
            }
            if loc_prime == 0 {
                // Repeated locator root: the pattern is inconsistent.
                return None;
            }

            // Scale alpha^((prim - fcr) * degree) folds the evaluator
            // convention (x * S(x)) together with the fcr offset of the
            // syndrome roots; at fcr = 0, prim = 1 it reduces to Xi.
            let scale = self
                .gf
                .alpha_pow((self.prim as isize - self.fcr as isize) * degree as isize);
            let y = self.gf.mul(scale, poly_eval(&self.gf, &omega, xi_inv));

            e[positions[i]] = self.gf.div(y, loc_prime).ok()?;
        }

        Some(poly_add(poly, &e))
    }
}

/// Greatest common divisor, for validating the root step against the
/// multiplicative group order.
fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

// --- Generator polynomial ---

/// Product of (x - alpha^(fcr + i*prim)) for i in 0..nroots.
fn generator_poly(gf: &GaloisField, fcr: usize, prim: usize, nroots: usize) -> Vec<u8> {
    let mut gen = vec![1u8];
    for i in 0..nroots {
        let root = gf.alpha_pow((fcr + i * prim) as isize);
        gen = poly_mul(gf, &gen, &[1, root]);
    }
    gen
}

// --- Polynomial helpers (coefficients high-to-low degree) ---

fn poly_scale(gf: &GaloisField, p: &[u8], x: u8) -> Vec<u8> {
    p.iter().map(|&c| gf.mul(c, x)).collect()
}

fn poly_add(p: &[u8], q: &[u8]) -> Vec<u8> {
    let len = p.len().max(q.len());
    let mut result = vec![0u8; len];
    for (i, &v) in p.iter().enumerate() {
        result[i + len - p.len()] = v;
    }
    for (i, &v) in q.iter().enumerate() {
        result[i + len - q.len()] ^= v;
    }
    result
}

fn poly_mul(gf: &GaloisField, p: &[u8], q: &[u8]) -> Vec<u8> {
    let mut result = vec![0u8; p.len() + q.len() - 1];
    for (j, &qv) in q.iter().enumerate() {
        for (i, &pv) in p.iter().enumerate() {
            result[i + j] ^= gf.mul(pv, qv);
        }
    }
    result
}

/// Remainder of p divided by a monic q.
fn poly_rem(gf: &GaloisField, p: &[u8], q: &[u8]) -> Vec<u8> {
    let mut result = p.to_vec();
    for i in 0..(p.len() - (q.len() - 1)) {
        let coef = result[i];
        if coef != 0 {
            for j in 1..q.len() {
                if q[j] != 0 {
                    result[i + j] ^= gf.mul(q[j], coef);
                }
            }
        }
    }
    let sep = p.len() - (q.len() - 1);
    result[sep..].to_vec()
}

fn poly_eval(gf: &GaloisField, p: &[u8], x: u8) -> u8 {
    let mut y = p[0];
    for &c in &p[1..] {
        y = gf.mul(y, x) ^ c;
    }
    y
}
