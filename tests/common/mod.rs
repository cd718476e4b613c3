#![allow(dead_code)]

pub const BOUNDARY: &str = "X-PCASP-BOUNDARY";

/// Trial balance with one matching creditor, one under-executed contract and
/// one creditor that only appears in group 7.
pub const SAMPLE_CSV: &str = "Máscara;Descrição;Saldo Anterior;Tipo Saldo;Débito;Crédito;Movimento;Saldo Atual;Tipo Saldo
7.1.2.1.1.01.00;CONTRATOS DE SERVIÇOS;0,00;D;0,00;0,00;0,00;4.500,00;D
;12345678901 - JOSÉ DA SILVA;0,00;D;1.500,00;0,00;1.500,00;1.500,00;D
;12345678000199 - CONSTRUTORA ALFA LTDA;0,00;D;3.000,00;0,00;3.000,00;3.000,00;D
7.1.2.1.1.02.00;CONVÊNIOS;0,00;D;0,00;0,00;0,00;800,00;D
;98765432100 - MARIA SOUZA;0,00;D;800,00;0,00;800,00;800,00;D
8.1.2.1.1.01.00;EXECUÇÃO DE CONTRATOS;0,00;C;0,00;0,00;0,00;4.000,00;C
;12345678901 - JOSÉ DA SILVA;0,00;C;0,00;1.500,00;1.500,00;1.500,00;C
;12345678000199 - CONSTRUTORA ALFA LTDA;0,00;C;0,00;2.500,00;2.500,00;2.500,00;C
1.1.1.1.1.01.00;CAIXA;0,00;D;0,00;0,00;0,00;100,00;D
";

pub fn multipart_body(file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: text/csv\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

/// Reads one entry of an xlsx (zip) container as text.
pub fn xlsx_entry(workbook: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(workbook.to_vec())).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut content = String::new();
    std::io::Read::read_to_string(&mut file, &mut content).unwrap();
    content
}
