// Customer endpoints: /customers and /customers/{id}

use crate::ApiClient;
use crate::error::Error;
use crate::types::{CustomerFields, CustomerRecord, RawId};

impl ApiClient {
    pub async fn list_customers(&self) -> Result<Vec<CustomerRecord>, Error> {
        self.get(&["customers"]).await
    }

    /// Fetch one customer. The backend embeds the customer's loans.
    pub async fn get_customer(&self, id: &RawId) -> Result<CustomerRecord, Error> {
        self.get(&["customers", &id.to_string()]).await
    }

    pub async fn create_customer(&self, fields: &CustomerFields) -> Result<CustomerRecord, Error> {
        self.post(&["customers"], fields).await
    }

    pub async fn update_customer(
        &self,
        id: &RawId,
        fields: &CustomerFields,
    ) -> Result<CustomerRecord, Error> {
        self.put(&["customers", &id.to_string()], fields).await
    }

    pub async fn delete_customer(&self, id: &RawId) -> Result<(), Error> {
        self.delete(&["customers", &id.to_string()]).await
    }
}
