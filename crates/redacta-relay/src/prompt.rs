//! Instruction templates for the two request modes.
//!
//! Each template is a fixed Catalan preamble; the caller's raw text is
//! appended verbatim, with no sanitization beyond what the transport gives.

use redacta_core::Mode;

/// Long-form report template (mode `informe`).
const INFORME_PREAMBLE: &str = "Ets un expert en redacció d'informes policials per la Guàrdia Municipal de Catalunya.

TASCA: Converteix aquest text col·loquial en un informe tècnic policial professional en CATALÀ.

REGLES:
- Llenguatge formal i objectiu
- Vocabulari tècnic: \"bipedestació\", \"es va procedir a\", \"es va observar\"
- Començar amb \"A les [HORA] hores,\"
- Estructura: FETS → ACTUACIÓ → RESULTAT
- Extensió: 150-250 paraules";

const INFORME_CLOSING: &str = "RESPON NOMÉS AMB LA VERSIÓ TÈCNICA.";

/// Short log-entry template (mode `bitacola`, the default).
const BITACOLA_PREAMBLE: &str = "Ets un agent de la Guàrdia Municipal de Catalunya que redacta la bitàcola diària del servei.

TASCA: Converteix aquest text col·loquial en una entrada breu de bitàcola en CATALÀ.

REGLES:
- Llenguatge formal i objectiu
- Una a tres frases, sense valoracions personals
- Començar amb \"A les [HORA] hores,\"
- Mantenir tots els fets del text original";

const BITACOLA_CLOSING: &str = "RESPON NOMÉS AMB L'ENTRADA DE BITÀCOLA.";

/// Render the full prompt for a mode: preamble, the raw text, closing line.
pub fn render(mode: Mode, text: &str) -> String {
    let (preamble, closing) = match mode {
        Mode::Informe => (INFORME_PREAMBLE, INFORME_CLOSING),
        Mode::Bitacola => (BITACOLA_PREAMBLE, BITACOLA_CLOSING),
    };
    format!("{preamble}\n\nTEXT: {text}\n\n{closing}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn informe_template_wraps_text_verbatim() {
        let p = render(Mode::Informe, "hi havia un home estirat al carrer");
        assert!(p.contains("informes policials"));
        assert!(p.contains("TEXT: hi havia un home estirat al carrer"));
        assert!(p.ends_with("RESPON NOMÉS AMB LA VERSIÓ TÈCNICA."));
    }

    #[test]
    fn bitacola_template_is_the_short_form() {
        let p = render(Mode::Bitacola, "volta pel barri, tot tranquil");
        assert!(p.contains("bitàcola"));
        assert!(p.contains("TEXT: volta pel barri, tot tranquil"));
        assert!(!p.contains("150-250"));
    }
}
