use indexmap::IndexMap;

/// Resolves raw field names to display names for a given schema hint.
/// `None` means unmapped; display falls back to the raw key.
pub trait LabelFormatter {
    fn format_label(&self, schema_hint: &str, raw_key: &str) -> Option<String>;
}

/// Formatter that maps nothing; every key displays as itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLabels;

impl LabelFormatter for NoLabels {
    fn format_label(&self, _schema_hint: &str, _raw_key: &str) -> Option<String> {
        None
    }
}

/// Translation tables keyed by schema hint.
#[derive(Debug, Clone, Default)]
pub struct StaticLabels {
    tables: IndexMap<String, IndexMap<String, String>>,
}

impl StaticLabels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table<K, V>(
        mut self,
        schema_hint: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let table = entries
            .into_iter()
            .map(|(key, label)| (key.into(), label.into()))
            .collect();
        self.tables.insert(schema_hint.into(), table);
        self
    }
}

impl LabelFormatter for StaticLabels {
    fn format_label(&self, schema_hint: &str, raw_key: &str) -> Option<String> {
        self.tables.get(schema_hint)?.get(raw_key).cloned()
    }
}

/// Mapped display name when one exists, the raw key otherwise.
pub fn display_label(formatter: &dyn LabelFormatter, schema_hint: &str, raw_key: &str) -> String {
    formatter
        .format_label(schema_hint, raw_key)
        .unwrap_or_else(|| raw_key.to_string())
}

/// Labels that read as money get currency formatting. Substring heuristic,
/// kept exactly as shipped; behavior parity depends on it.
pub fn is_currency_label(label: &str) -> bool {
    let label = label.to_lowercase();
    ["precio", "costo", "total", "monto"]
        .iter()
        .any(|needle| label.contains(needle))
}

/// The built-in tables for the two facture schemas the OCR backend emits.
pub fn facture_labels() -> StaticLabels {
    StaticLabels::new()
        .with_table(
            "facture_weekend",
            [
                ("rfc_emisor", "RFC Emisor"),
                ("name_emisor", "Nombre Emisor"),
                ("rfc_receptor", "RFC Receptor"),
                ("name_receptor", "Nombre Receptor"),
                ("postal_code_receptor", "Código Postal Receptor"),
                ("tax_folio", "Folio Fiscal"),
                ("no_csd", "No. CSD"),
                ("postal_code_emisor", "Código Postal Emisor"),
                ("datetime_emisor", "Fecha y Hora de Emisión"),
                ("concepts", "Conceptos"),
                ("type_money", "Tipo de Moneda"),
                ("type_pay", "Tipo de Pago"),
                ("method_pay", "Método de Pago"),
                ("subtotal", "Subtotal"),
                ("transferred_taxes", "Impuestos Trasladados"),
                ("stoped_taxes", "Impuestos Retenidos"),
                ("total", "Total"),
                ("url_qr", "URL Código QR"),
                ("product_code", "Código de Producto"),
                ("cuantity_trips", "Cantidad de Viajes"),
                ("key_unit", "Clave de Unidad"),
                ("type_unit", "Tipo de Unidad"),
                ("value_unit", "Valor Unitario"),
                ("import_total", "Importe Total"),
                ("discount", "Descuento"),
                ("object_duty", "Objeto del Impuesto"),
                ("description", "Descripción"),
                ("dutys_of_concept", "Impuestos del Concepto"),
                ("duty", "Impuesto"),
                ("type_duty", "Tipo de Impuesto"),
                ("base_import", "Base del Importe"),
                ("type_factor", "Tipo de Factor"),
                ("rate_fee", "Tasa o Cuota"),
                ("import_with_fee_rate", "Importe con Tasa o Cuota"),
            ],
        )
        .with_table(
            "facture_trip",
            [
                ("name_business", "Nombre de la Empresa"),
                ("business_region", "Región de la Empresa"),
                ("business_ubication", "Ubicación de la Empresa"),
                ("key", "Clave"),
                ("code_facture", "Código de Factura"),
                ("type_material", "Tipo de Material"),
                ("type_movement", "Tipo de Movimiento"),
                ("date_entry", "Fecha de Entrada"),
                ("cuantity_bales", "Cantidad de Pacas"),
                ("container", "Contenedor"),
                ("type_document", "Tipo de Documento"),
                ("date_exit", "Fecha de Salida"),
                ("proveedor", "Proveedor"),
                ("name_transport", "Nombre del Transportista"),
                ("name_operator", "Nombre del Operador"),
                ("plates", "Placas"),
                ("ubication_trip", "Ubicación del Viaje"),
                ("gross_weight", "Peso Bruto"),
                ("tare_weight", "Peso Tara"),
                ("net_weight", "Peso Neto"),
                ("not_suitable", "No Apto"),
                ("forbiden_weight", "Peso Prohibido"),
                ("humidity", "Humedad"),
                ("kg_desc_not_suitable", "Kg Descontados por No Apto"),
                ("kg_desc_forbiden", "Kg Descontados por Prohibido"),
                ("kg_desc_humidity", "Kg Descontados por Humedad"),
                ("kg_desc_accepted_weight", "Kg de Peso Aceptado"),
                ("recibes_trip", "Recibe el Viaje"),
            ],
        )
}

#[cfg(test)]
mod tests {
    use super::{LabelFormatter, NoLabels, display_label, facture_labels, is_currency_label};

    #[test]
    fn facture_tables_resolve_known_keys() {
        let labels = facture_labels();
        assert_eq!(
            labels.format_label("facture_weekend", "tax_folio").as_deref(),
            Some("Folio Fiscal")
        );
        assert_eq!(
            labels.format_label("facture_trip", "net_weight").as_deref(),
            Some("Peso Neto")
        );
    }

    #[test]
    fn unmapped_keys_fall_back_to_the_raw_key() {
        let labels = facture_labels();
        assert_eq!(
            display_label(&labels, "facture_weekend", "campo_nuevo"),
            "campo_nuevo"
        );
        assert_eq!(display_label(&labels, "otro_schema", "tax_folio"), "tax_folio");
        assert_eq!(display_label(&NoLabels, "facture_trip", "plates"), "plates");
    }

    #[test]
    fn currency_heuristic_is_substring_and_case_insensitive() {
        assert!(is_currency_label("precio_unitario"));
        assert!(is_currency_label("Costo Total"));
        assert!(is_currency_label("MONTO"));
        assert!(is_currency_label("subtotal"));
        assert!(!is_currency_label("cantidad"));
        assert!(!is_currency_label("peso_neto"));
    }
}
