// Cloud authentication
//
// Two-step flow: a form-encoded login against the identity host sets the
// session cookie, then an OpenID "begin" GET against the API host
// activates it for resource calls. Both steps repeat on re-authentication.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::ElementsClient;
use crate::error::Error;
use crate::models::LoginReply;

const LOGIN_PATH: &str = "identity/api/v1/user/login";
const OPENID_BEGIN_PATH: &str = "api/v1/auth/openid/begin?op=gigaset";

impl ElementsClient {
    /// Authenticate against the identity host.
    ///
    /// On success the session cookie lands in the client's jar and the
    /// vendor's greeting message is returned for display.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginReply, Error> {
        let url = self.identity_url(LOGIN_PATH)?;
        debug!("logging in at {}", url);

        let form = [("email", email), ("password", password.expose_secret())];
        let reply: LoginReply = match self.post_form(url, &form).await {
            Ok(reply) => reply,
            // The identity host answers a bad login with a non-2xx and a
            // JSON error body; fold that into an auth error.
            Err(Error::Status { status, body }) if status == 403 || status == 400 => {
                return Err(Error::Authentication {
                    message: format!("login rejected (HTTP {status}): {body}"),
                });
            }
            Err(e) => return Err(e),
        };

        debug!("login successful");
        Ok(reply)
    }

    /// Activate the session for the resource API.
    ///
    /// Must follow [`login`](Self::login); the reply body is an opaque
    /// token string that callers only ever display.
    pub async fn begin_session(&self) -> Result<String, Error> {
        let url = self.api_url(OPENID_BEGIN_PATH)?;
        debug!("beginning session at {}", url);
        let token = self.get_text(url).await?;
        debug!("session active");
        Ok(token)
    }
}
