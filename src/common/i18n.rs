// src/common/i18n.rs

// Catálogos de mensagens. Chave desconhecida volta como a própria chave;
// idioma desconhecido cai no inglês.

const EN: &[(&str, &str)] = &[
    ("error.validation", "One or more fields are invalid."),
    ("error.username_taken", "Username already exists"),
    ("error.invalid_credentials", "Invalid credentials"),
    ("error.invalid_token", "Missing or invalid authentication token."),
    ("error.product_not_found", "Product not found."),
    ("error.unique_violation", "This record already exists."),
    ("error.internal", "An unexpected error occurred."),
    ("notice.access_denied", "Access denied. Admins only."),
    ("notice.registered", "Registration successful. You can login now."),
    ("notice.logged_in", "Logged in successfully!"),
    ("notice.logged_out", "Logged out successfully."),
    ("notice.product_added", "Product added!"),
    ("notice.product_updated", "Product updated."),
    ("notice.product_deleted", "Product deleted."),
    ("validation.required", "This field is required."),
    ("validation.integer", "Must be a whole number."),
    ("validation.integer_range", "Number is out of range."),
    ("validation.decimal", "Must be a number."),
    ("validation.price_range", "Price is out of range."),
    ("validation.username_length", "Username must be between 1 and 150 characters."),
    ("validation.password_length", "Password must be at least 6 characters."),
    ("validation.name_length", "Name must be between 1 and 150 characters."),
    ("validation.category_length", "Category must be at most 100 characters."),
    ("validation.sku_length", "SKU must be at most 100 characters."),
];

const PT: &[(&str, &str)] = &[
    ("error.validation", "Um ou mais campos são inválidos."),
    ("error.username_taken", "Nome de usuário já existe"),
    ("error.invalid_credentials", "Credenciais inválidas"),
    ("error.invalid_token", "Token de autenticação inválido ou ausente."),
    ("error.product_not_found", "Produto não encontrado."),
    ("error.unique_violation", "Este registro já existe."),
    ("error.internal", "Ocorreu um erro inesperado."),
    ("notice.access_denied", "Acesso negado. Somente administradores."),
    ("notice.registered", "Cadastro realizado. Você já pode entrar."),
    ("notice.logged_in", "Login realizado com sucesso!"),
    ("notice.logged_out", "Você saiu da conta."),
    ("notice.product_added", "Produto adicionado!"),
    ("notice.product_updated", "Produto atualizado."),
    ("notice.product_deleted", "Produto removido."),
    ("validation.required", "Campo obrigatório."),
    ("validation.integer", "Deve ser um número inteiro."),
    ("validation.integer_range", "Número fora do intervalo permitido."),
    ("validation.decimal", "Deve ser um número."),
    ("validation.price_range", "Preço fora do intervalo permitido."),
    ("validation.username_length", "O nome de usuário deve ter entre 1 e 150 caracteres."),
    ("validation.password_length", "A senha deve ter no mínimo 6 caracteres."),
    ("validation.name_length", "O nome deve ter entre 1 e 150 caracteres."),
    ("validation.category_length", "A categoria deve ter no máximo 100 caracteres."),
    ("validation.sku_length", "O SKU deve ter no máximo 100 caracteres."),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct I18nStore;

impl I18nStore {
    pub fn new() -> Self {
        Self
    }

    fn catalog(lang: &str) -> &'static [(&'static str, &'static str)] {
        match lang {
            "pt" => PT,
            _ => EN,
        }
    }

    pub fn translate(&self, lang: &str, key: &str) -> String {
        Self::catalog(lang)
            .iter()
            .chain(EN.iter())
            .find(|(k, _)| *k == key)
            .map(|(_, msg)| msg.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_known_keys() {
        let store = I18nStore::new();
        assert_eq!(store.translate("en", "notice.product_added"), "Product added!");
        assert_eq!(store.translate("pt", "notice.product_added"), "Produto adicionado!");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let store = I18nStore::new();
        assert_eq!(
            store.translate("de", "notice.access_denied"),
            "Access denied. Admins only."
        );
    }

    #[test]
    fn unknown_key_is_returned_as_is() {
        assert_eq!(I18nStore::new().translate("pt", "nope"), "nope");
    }

    #[test]
    fn catalogs_have_the_same_keys() {
        let en: Vec<&str> = EN.iter().map(|(k, _)| *k).collect();
        let pt: Vec<&str> = PT.iter().map(|(k, _)| *k).collect();
        assert_eq!(en, pt);
    }
}
